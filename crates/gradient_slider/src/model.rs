use gpui::{Hsla, Pixels, Point, Size};

use crate::{
    color::{GradientStop, TrackColors},
    defaults,
    gesture::{GestureEvents, GestureState, GestureTracker, GradientSliderEvent},
    image::SliderImage,
    layout::{LayoutParams, SliderLayout, value_for_location},
    value::ValueModel,
};

/// The toolkit independent state of a gradient slider.
///
/// Owns the value, the colors, the layout parameters and the gesture state,
/// and keeps the resolved [`SliderLayout`] current after every mutation.
#[derive(Clone, Debug)]
pub struct SliderModel {
    value: ValueModel,
    colors: TrackColors,
    continuous: bool,
    thickness: f32,
    thumb_size: f32,
    min_image: Option<SliderImage>,
    max_image: Option<SliderImage>,
    thumb_icon: Option<SliderImage>,
    thumb_color: Hsla,
    track_border_color: Hsla,
    track_border_width: f32,
    gesture: GestureTracker,
    view_size: Size<Pixels>,
    layout: SliderLayout,
}

impl Default for SliderModel {
    fn default() -> Self {
        let mut this = Self {
            value: ValueModel::default(),
            colors: TrackColors::default(),
            continuous: true,
            thickness: defaults::THICKNESS,
            thumb_size: defaults::THUMB_SIZE,
            min_image: None,
            max_image: None,
            thumb_icon: None,
            thumb_color: defaults::thumb_color(),
            track_border_color: defaults::track_border_color(),
            track_border_width: defaults::TRACK_BORDER_WIDTH,
            gesture: GestureTracker::default(),
            view_size: Size::default(),
            layout: SliderLayout::compute(Size::default(), &Self::bare_params(), 0.0),
        };
        this.relayout();
        this
    }
}

impl SliderModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f32 {
        self.value.value()
    }

    pub fn minimum_value(&self) -> f32 {
        self.value.minimum()
    }

    pub fn maximum_value(&self) -> f32 {
        self.value.maximum()
    }

    pub fn value_percent(&self) -> f32 {
        self.value.percent()
    }

    pub fn colors(&self) -> &TrackColors {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut TrackColors {
        &mut self.colors
    }

    pub fn stops(&self) -> &[GradientStop] {
        self.colors.stops()
    }

    pub fn continuous(&self) -> bool {
        self.continuous
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn thumb_size(&self) -> f32 {
        self.thumb_size
    }

    pub fn min_image(&self) -> Option<&SliderImage> {
        self.min_image.as_ref()
    }

    pub fn max_image(&self) -> Option<&SliderImage> {
        self.max_image.as_ref()
    }

    pub fn thumb_icon(&self) -> Option<&SliderImage> {
        self.thumb_icon.as_ref()
    }

    pub fn thumb_color(&self) -> Hsla {
        self.thumb_color
    }

    pub fn track_border_color(&self) -> Hsla {
        self.track_border_color
    }

    pub fn track_border_width(&self) -> f32 {
        self.track_border_width
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn view_size(&self) -> Size<Pixels> {
        self.view_size
    }

    pub fn layout(&self) -> &SliderLayout {
        &self.layout
    }

    /// Preferred height of the control, the width has no intrinsic size.
    pub fn intrinsic_height(&self) -> f32 {
        self.thumb_size
    }

    pub fn set_value(&mut self, value: f32) -> f32 {
        let value = self.value.set_value(value);
        self.relayout();
        value
    }

    pub fn set_minimum_value(&mut self, minimum: f32) {
        self.value.set_minimum(minimum);
        self.relayout();
    }

    pub fn set_maximum_value(&mut self, maximum: f32) {
        self.value.set_maximum(maximum);
        self.relayout();
    }

    /// Set both bounds without passing through an intermediate range.
    pub fn set_range(&mut self, minimum: f32, maximum: f32) {
        self.value.set_range(minimum, maximum);
        self.relayout();
    }

    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness.max(0.0);
        self.relayout();
    }

    pub fn set_thumb_size(&mut self, thumb_size: f32) {
        self.thumb_size = thumb_size.max(0.0);
        self.relayout();
    }

    /// Set or clear the image left of the track; clearing drops the end-cap node.
    pub fn set_min_image(&mut self, image: Option<SliderImage>) {
        self.min_image = image;
        self.relayout();
    }

    pub fn set_max_image(&mut self, image: Option<SliderImage>) {
        self.max_image = image;
        self.relayout();
    }

    pub fn set_thumb_icon(&mut self, icon: Option<SliderImage>) {
        self.thumb_icon = icon;
        self.relayout();
    }

    /// Fill the thumb with a solid color, replacing any icon.
    pub fn set_thumb_color(&mut self, color: impl Into<Hsla>) {
        self.thumb_color = color.into();
        self.set_thumb_icon(None);
    }

    pub fn set_track_border(&mut self, color: impl Into<Hsla>, width: f32) {
        self.track_border_color = color.into();
        self.track_border_width = width.max(0.0);
    }

    /// Returns `true` when the size differs from the previous one.
    pub fn set_view_size(&mut self, view_size: Size<Pixels>) -> bool {
        if self.view_size == view_size {
            return false;
        }

        tracing::debug!("gradient slider resized to {:?}", view_size);
        self.view_size = view_size;
        self.relayout();
        true
    }

    /// Invert a view-local x-coordinate to the value it represents.
    pub fn value_for_location(&self, x: f32) -> f32 {
        value_for_location(
            x,
            f32::from(self.view_size.width),
            &self.layout_params(),
            &self.value,
        )
    }

    pub fn pointer_down(&mut self, position: Point<Pixels>) -> Option<GradientSliderEvent> {
        self.gesture.begin(position, &self.layout, &self.value)
    }

    pub fn pointer_move(&mut self, position: Point<Pixels>) -> Option<GradientSliderEvent> {
        let event = self.gesture.drag(
            f32::from(position.x),
            self.layout.travel,
            &mut self.value,
            self.continuous,
        );
        self.relayout();
        event
    }

    pub fn pointer_up(&mut self, position: Option<Point<Pixels>>) -> GestureEvents {
        let events = self.gesture.end(
            position.map(|position| f32::from(position.x)),
            self.layout.travel,
            &mut self.value,
        );
        self.relayout();
        events
    }

    fn layout_params(&self) -> LayoutParams<'_> {
        LayoutParams {
            thickness: self.thickness,
            thumb_size: self.thumb_size,
            min_image: self.min_image.as_ref(),
            max_image: self.max_image.as_ref(),
            thumb_icon: self.thumb_icon.as_ref(),
        }
    }

    fn bare_params() -> LayoutParams<'static> {
        LayoutParams {
            thickness: defaults::THICKNESS,
            thumb_size: defaults::THUMB_SIZE,
            min_image: None,
            max_image: None,
            thumb_icon: None,
        }
    }

    fn relayout(&mut self) {
        self.layout =
            SliderLayout::compute(self.view_size, &self.layout_params(), self.value.percent());
    }
}
