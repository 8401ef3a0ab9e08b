use gpui::{Bounds, Pixels, Point, Size, point, px, size};

use crate::{defaults, image::SliderImage, value::ValueModel};

/// Everything besides the view size and the value that shapes the layout.
#[derive(Clone, Copy, Debug)]
pub struct LayoutParams<'a> {
    pub thickness: f32,
    pub thumb_size: f32,
    pub min_image: Option<&'a SliderImage>,
    pub max_image: Option<&'a SliderImage>,
    pub thumb_icon: Option<&'a SliderImage>,
}

/// Horizontal space reserved at both ends of the track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackInsets {
    pub left: f32,
    pub right: f32,
}

impl TrackInsets {
    pub fn new(min_image: Option<&SliderImage>, max_image: Option<&SliderImage>) -> Self {
        Self {
            left: Self::inset_for(min_image),
            right: Self::inset_for(max_image),
        }
    }

    fn inset_for(image: Option<&SliderImage>) -> f32 {
        image.map_or(defaults::BARE_INSET, |image| {
            image.width + defaults::END_CAP_GAP
        })
    }
}

/// The horizontal span the thumb center can travel along.
///
/// The thumb radius is reserved at both ends so it never overhangs the track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbTravel {
    pub start: f32,
    pub length: f32,
}

impl ThumbTravel {
    pub fn new(view_width: f32, params: &LayoutParams) -> Self {
        let insets = TrackInsets::new(params.min_image, params.max_image);
        let track_width = (view_width - insets.left - insets.right).max(0.0);

        Self {
            start: insets.left + params.thumb_size / 2.0,
            length: (track_width - params.thumb_size).max(0.0),
        }
    }

    /// Forward mapping, normalized percent to the thumb center x.
    pub fn position_for_percent(&self, percent: f32) -> f32 {
        self.start + self.length * percent.clamp(0.0, 1.0)
    }

    /// Inverse mapping, pointer x to a normalized percent.
    pub fn percent_for_position(&self, x: f32) -> f32 {
        if self.length <= f32::EPSILON {
            return 0.0;
        }

        ((x - self.start) / self.length).clamp(0.0, 1.0)
    }
}

/// Invert a pointer x-coordinate (relative to the view) to a slider value.
pub fn value_for_location(
    x: f32,
    view_width: f32,
    params: &LayoutParams,
    value: &ValueModel,
) -> f32 {
    let travel = ThumbTravel::new(view_width, params);
    value.value_at_percent(travel.percent_for_position(x))
}

/// The resolved geometry of every node the slider draws, in view-local pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderLayout {
    pub track: Bounds<Pixels>,
    pub thumb: Bounds<Pixels>,
    /// The thumb fill or icon, relative to the thumb origin.
    pub thumb_icon: Bounds<Pixels>,
    pub min_image: Option<Bounds<Pixels>>,
    pub max_image: Option<Bounds<Pixels>>,
    pub travel: ThumbTravel,
}

impl SliderLayout {
    pub fn compute(view_size: Size<Pixels>, params: &LayoutParams, percent: f32) -> Self {
        let width = f32::from(view_size.width);
        let height = f32::from(view_size.height);
        let mid_y = height / 2.0;

        let insets = TrackInsets::new(params.min_image, params.max_image);
        let track_width = (width - insets.left - insets.right).max(0.0);
        let track = rect(
            insets.left,
            mid_y - params.thickness / 2.0,
            track_width,
            params.thickness,
        );

        let travel = ThumbTravel::new(width, params);
        let thumb = Self::thumb_bounds(
            point(px(travel.position_for_percent(percent)), px(mid_y)),
            params.thumb_size,
        );

        let icon_side = Self::thumb_icon_side(params.thumb_size, params.thumb_icon);
        let icon_offset = (params.thumb_size - icon_side) / 2.0;
        let thumb_icon = rect(icon_offset, icon_offset, icon_side, icon_side);

        let min_image = params
            .min_image
            .map(|image| rect(0.0, mid_y - image.height / 2.0, image.width, image.height));
        let max_image = params.max_image.map(|image| {
            rect(
                width - image.width,
                mid_y - image.height / 2.0,
                image.width,
                image.height,
            )
        });

        Self {
            track,
            thumb,
            thumb_icon,
            min_image,
            max_image,
            travel,
        }
    }

    pub fn thumb_center(&self) -> Point<Pixels> {
        self.thumb.center()
    }

    /// The square accepting a pointer-down, never smaller than the minimum hit target.
    pub fn hit_area(&self) -> Bounds<Pixels> {
        let thumb_size = f32::from(self.thumb.size.width);
        Self::thumb_bounds(
            self.thumb_center(),
            thumb_size.max(defaults::MIN_HIT_TARGET),
        )
    }

    pub fn hit_test(&self, position: Point<Pixels>) -> bool {
        self.hit_area().contains(&position)
    }

    /// Side of the square inside the thumb showing the fill color or icon.
    pub fn thumb_icon_side(thumb_size: f32, icon: Option<&SliderImage>) -> f32 {
        let side = (thumb_size - defaults::THUMB_ICON_INSET).max(0.0);
        match icon {
            Some(icon) => icon.max_side().min(side),
            None => side,
        }
    }

    fn thumb_bounds(center: Point<Pixels>, side: f32) -> Bounds<Pixels> {
        let half = px(side / 2.0);
        Bounds::new(
            point(center.x - half, center.y - half),
            size(px(side), px(side)),
        )
    }
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> Bounds<Pixels> {
    Bounds::new(point(px(x), px(y)), size(px(width), px(height)))
}
