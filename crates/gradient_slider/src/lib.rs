mod archive;
mod color;
mod gesture;
mod image;
mod layout;
mod model;
mod slider;
mod thumb;
mod track;
mod value;

pub use archive::{ArchivedImage, SliderArchive, color_from_hex, color_to_hex};
pub use color::{GradientStop, Hsb, RAINBOW_SEGMENTS, TrackColors, hsb, interpolate_rgb, rgb_f32};
pub use gesture::{GestureState, GradientSliderEvent};
pub use image::SliderImage;
pub use layout::{LayoutParams, SliderLayout, ThumbTravel, TrackInsets, value_for_location};
pub use model::SliderModel;
pub use slider::{GradientSlider, GradientSliderState, SliderActionHandler};
pub use value::ValueModel;

/// Default values used by a freshly constructed slider.
pub mod defaults {
    use gpui::{Hsla, Rgba};

    pub const VALUE: f32 = 0.0;
    pub const MINIMUM_VALUE: f32 = 0.0;
    pub const MAXIMUM_VALUE: f32 = 1.0;

    pub const THICKNESS: f32 = 2.0;
    pub const THUMB_SIZE: f32 = 28.0;
    pub const TRACK_BORDER_WIDTH: f32 = 0.0;

    /// Horizontal inset at a track end without an image.
    pub const BARE_INSET: f32 = 2.0;
    /// Gap between an end-cap image and the track.
    pub const END_CAP_GAP: f32 = 13.0;
    /// The thumb accepts pointer-downs in at least this square.
    pub const MIN_HIT_TARGET: f32 = 44.0;
    /// The thumb fill or icon is this much smaller than the thumb.
    pub const THUMB_ICON_INSET: f32 = 4.0;

    /// Duration of an animated value change, in seconds.
    pub const THUMB_ANIMATION_SECS: f64 = 0.2;

    fn rgba(r: f32, g: f32, b: f32) -> Hsla {
        Rgba { r, g, b, a: 1.0 }.into()
    }

    pub fn min_color() -> Hsla {
        rgba(0.0, 0.0, 1.0)
    }

    pub fn max_color() -> Hsla {
        rgba(1.0, 0.5, 0.0)
    }

    pub fn thumb_color() -> Hsla {
        gpui::white()
    }

    pub fn track_border_color() -> Hsla {
        gpui::black()
    }

    /// Min color of an archive that does not carry one.
    pub fn archived_min_color() -> Hsla {
        rgba(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0)
    }

    /// Max color of an archive that does not carry one.
    pub fn archived_max_color() -> Hsla {
        rgba(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0)
    }
}
