use gpui::{prelude::*, *};

use crate::{image::SliderImage, layout::SliderLayout};

/// The draggable disc, filled with a solid color or showing an icon.
#[derive(IntoElement)]
pub struct SliderThumb {
    style: ThumbStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThumbStyle {
    pub size: Pixels,
    pub color: Hsla,
    pub icon: Option<SliderImage>,
    pub background: Hsla,
    pub border_color: Hsla,
    pub border_width: Pixels,
}

impl ThumbStyle {
    pub fn new(size: impl Into<Pixels>) -> Self {
        Self {
            size: size.into(),
            color: white(),
            icon: None,
            background: white(),
            border_color: black().opacity(0.15),
            border_width: px(0.5),
        }
    }

    fn shadow() -> Vec<BoxShadow> {
        vec![BoxShadow {
            color: hsla(0., 0., 0., 0.25),
            offset: point(px(0.), px(2.5)),
            blur_radius: px(2.),
            spread_radius: px(0.),
        }]
    }
}

impl SliderThumb {
    pub fn new(size: impl Into<Pixels>) -> Self {
        Self {
            style: ThumbStyle::new(size),
        }
    }

    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.style.color = color.into();
        self
    }

    pub fn icon(mut self, icon: Option<SliderImage>) -> Self {
        self.style.icon = icon;
        self
    }

    fn render_fill(style: &ThumbStyle, side: Pixels) -> AnyElement {
        match &style.icon {
            Some(icon) => img(icon.source.clone()).size(side).into_any_element(),
            None => div()
                .size(side)
                .rounded_full()
                .bg(style.color)
                .into_any_element(),
        }
    }
}

impl RenderOnce for SliderThumb {
    fn render(self, _: &mut Window, _cx: &mut App) -> impl IntoElement {
        let style = self.style;
        let side = px(SliderLayout::thumb_icon_side(
            f32::from(style.size),
            style.icon.as_ref(),
        ));

        div()
            .size(style.size)
            .rounded_full()
            .bg(style.background)
            .border(style.border_width)
            .border_color(style.border_color)
            .shadow(ThumbStyle::shadow())
            .flex()
            .items_center()
            .justify_center()
            .child(Self::render_fill(&style, side))
    }
}
