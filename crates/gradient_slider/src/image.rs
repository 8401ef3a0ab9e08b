use gpui::SharedString;

/// An image shown by the slider, either as an end cap or as the thumb icon.
///
/// The natural size drives layout, so it is carried alongside the source.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderImage {
    pub source: SharedString,
    pub width: f32,
    pub height: f32,
}

impl SliderImage {
    pub fn new(source: impl Into<SharedString>, width: f32, height: f32) -> Self {
        Self {
            source: source.into(),
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// The longer of the two sides.
    pub fn max_side(&self) -> f32 {
        self.width.max(self.height)
    }
}
