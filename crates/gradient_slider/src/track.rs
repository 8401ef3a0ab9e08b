use gpui::{prelude::*, *};

use crate::color::GradientStop;

/// Start offset and size of segment `index`, overlapped by 2px with the next
/// one so adjacent gradient quads leave no sub-pixel seam.
fn overlapping_segment(
    index: usize,
    count: usize,
    start: Pixels,
    end: Pixels,
    total_size: Pixels,
) -> (Pixels, Pixels) {
    let end_offset = if index == count - 1 {
        total_size
    } else {
        let overlapped = end + px(2.0);
        if overlapped > total_size {
            total_size
        } else {
            overlapped
        }
    };
    (start, end_offset - start)
}

fn edge_corner_radii(radius: Pixels, is_first: bool, is_last: bool) -> Corners<Pixels> {
    let mut corner_radii = Corners::default();
    if is_first {
        corner_radii.top_left = radius;
        corner_radii.bottom_left = radius;
    }
    if is_last {
        corner_radii.top_right = radius;
        corner_radii.bottom_right = radius;
    }
    corner_radii
}

fn paint_stops(stops: &[GradientStop], bounds: Bounds<Pixels>, window: &mut Window) {
    let radius = bounds.size.height / 2.0;

    match stops {
        [] => return,
        [stop] => {
            window.paint_quad(fill(bounds, stop.color).corner_radii(Corners::all(radius)));
            return;
        }
        _ => {}
    }

    let total_size = bounds.size.width;
    let count = stops.len() - 1;
    for (i, pair) in stops.windows(2).enumerate() {
        let (start, end) = (pair[0], pair[1]);
        let (start_offset, segment_size) = overlapping_segment(
            i,
            count,
            total_size * start.location,
            total_size * end.location,
            total_size,
        );
        if segment_size <= px(0.) {
            continue;
        }

        window.paint_quad(PaintQuad {
            bounds: Bounds {
                origin: point(bounds.origin.x + start_offset, bounds.origin.y),
                size: size(segment_size, bounds.size.height),
            },
            corner_radii: edge_corner_radii(radius, i == 0, i == count - 1),
            background: linear_gradient(
                90.0,
                linear_color_stop(start.color, 0.0),
                linear_color_stop(end.color, 1.0),
            )
            .into(),
            border_widths: Edges::default(),
            border_color: transparent_black(),
            border_style: BorderStyle::default(),
        });
    }
}

/// The gradient bar, absolutely positioned at `bounds` inside the slider.
pub(crate) fn gradient_track(
    stops: Vec<GradientStop>,
    bounds: Bounds<Pixels>,
    border_color: Hsla,
    border_width: Pixels,
) -> Div {
    let radius = bounds.size.height / 2.0;

    div()
        .absolute()
        .left(bounds.origin.x)
        .top(bounds.origin.y)
        .w(bounds.size.width)
        .h(bounds.size.height)
        .rounded(radius)
        .overflow_hidden()
        .child(
            canvas(
                move |_, _, _| (),
                move |bounds, _, window, _| paint_stops(&stops, bounds, window),
            )
            .size_full(),
        )
        .when(border_width > px(0.), |this| {
            this.child(
                div()
                    .absolute()
                    .inset_0()
                    .rounded(radius)
                    .border(border_width)
                    .border_color(border_color),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::prelude::v1::test;

    #[test]
    fn segments_overlap_except_the_last() {
        let (start, len) = overlapping_segment(0, 2, px(0.), px(50.), px(100.));
        assert_eq!(start, px(0.));
        assert_eq!(len, px(52.));

        let (start, len) = overlapping_segment(1, 2, px(50.), px(100.), px(100.));
        assert_eq!(start, px(50.));
        assert_eq!(len, px(50.));
    }

    #[test]
    fn only_outer_segments_are_rounded() {
        let radius = px(3.);
        let first = edge_corner_radii(radius, true, false);
        assert_eq!(first.top_left, radius);
        assert_eq!(first.top_right, px(0.));

        let middle = edge_corner_radii(radius, false, false);
        assert_eq!(middle.bottom_left, px(0.));
        assert_eq!(middle.bottom_right, px(0.));
    }
}
