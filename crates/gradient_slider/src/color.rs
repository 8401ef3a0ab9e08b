use gpui::{Hsla, Rgba};

use crate::defaults;

/// Number of segments the rainbow gradient is split into; the track gets one
/// more stop than this.
pub const RAINBOW_SEGMENTS: usize = 36;

/// A color in the hue/saturation/brightness model, every channel in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsb {
    pub h: f32,
    pub s: f32,
    pub b: f32,
    pub a: f32,
}

impl Hsb {
    pub fn new(h: f32, s: f32, b: f32, a: f32) -> Self {
        Self {
            h: h.clamp(0.0, 1.0),
            s: s.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn from_rgba(rgba: Rgba) -> Self {
        let r = rgba.r;
        let g = rgba.g;
        let b = rgba.b;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;

        let s = if max == 0.0 { 0.0 } else { d / max };

        let mut h = 0.0;
        if max != min {
            if max == r {
                h = (g - b) / d + (if g < b { 6.0 } else { 0.0 });
            } else if max == g {
                h = (b - r) / d + 2.0;
            } else {
                h = (r - g) / d + 4.0;
            }
            h /= 6.0;
        }

        Self {
            h,
            s,
            b: max,
            a: rgba.a,
        }
    }

    pub fn from_hsla(hsla: Hsla) -> Self {
        Self::from_rgba(hsla.to_rgb())
    }

    pub fn to_rgba(self) -> Rgba {
        let h = self.h;
        let c = self.b * self.s;
        let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
        let m = self.b - c;

        let (r, g, b) = if h < 1.0 / 6.0 {
            (c, x, 0.0)
        } else if h < 2.0 / 6.0 {
            (x, c, 0.0)
        } else if h < 3.0 / 6.0 {
            (0.0, c, x)
        } else if h < 4.0 / 6.0 {
            (0.0, x, c)
        } else if h < 5.0 / 6.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Rgba {
            r: r + m,
            g: g + m,
            b: b + m,
            a: self.a,
        }
    }

    pub fn to_hsla(self) -> Hsla {
        self.to_rgba().into()
    }
}

/// Build an opaque color from hue/saturation/brightness.
pub fn hsb(h: f32, s: f32, b: f32) -> Hsla {
    Hsb::new(h, s, b, 1.0).to_hsla()
}

/// Build an opaque color from red/green/blue in `0..=1`.
pub fn rgb_f32(r: f32, g: f32, b: f32) -> Hsla {
    Rgba {
        r: r.clamp(0.0, 1.0),
        g: g.clamp(0.0, 1.0),
        b: b.clamp(0.0, 1.0),
        a: 1.0,
    }
    .into()
}

pub fn interpolate_rgb(start: Hsla, end: Hsla, t: f32) -> Hsla {
    let start_rgba: Rgba = start.into();
    let end_rgba: Rgba = end.into();

    let r = start_rgba.r + (end_rgba.r - start_rgba.r) * t;
    let g = start_rgba.g + (end_rgba.g - start_rgba.g) * t;
    let b = start_rgba.b + (end_rgba.b - start_rgba.b) * t;
    let a = start_rgba.a + (end_rgba.a - start_rgba.a) * t;

    Rgba { r, g, b, a }.into()
}

/// One `(color, location)` point of the track gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub color: Hsla,
    pub location: f32,
}

/// The colors of the track.
///
/// The stop list is derived from `min_color`, `max_color` and `has_rainbow`
/// and is rebuilt synchronously by every setter.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackColors {
    min_color: Hsla,
    max_color: Hsla,
    has_rainbow: bool,
    stops: Vec<GradientStop>,
}

impl Default for TrackColors {
    fn default() -> Self {
        Self::new(defaults::min_color(), defaults::max_color(), false)
    }
}

impl TrackColors {
    pub fn new(min_color: Hsla, max_color: Hsla, has_rainbow: bool) -> Self {
        let mut this = Self {
            min_color,
            max_color,
            has_rainbow,
            stops: Vec::new(),
        };
        this.update_stops();
        this
    }

    pub fn min_color(&self) -> Hsla {
        self.min_color
    }

    pub fn max_color(&self) -> Hsla {
        self.max_color
    }

    pub fn has_rainbow(&self) -> bool {
        self.has_rainbow
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn colors(&self) -> Vec<Hsla> {
        self.stops.iter().map(|stop| stop.color).collect()
    }

    pub fn locations(&self) -> Vec<f32> {
        self.stops.iter().map(|stop| stop.location).collect()
    }

    pub fn set_min_color(&mut self, color: impl Into<Hsla>) {
        self.min_color = color.into();
        self.update_stops();
    }

    pub fn set_max_color(&mut self, color: impl Into<Hsla>) {
        self.max_color = color.into();
        self.update_stops();
    }

    pub fn set_has_rainbow(&mut self, has_rainbow: bool) {
        self.has_rainbow = has_rainbow;
        self.update_stops();
    }

    /// Sweep the hue across the whole track at a fixed saturation and brightness.
    pub fn set_gradient_varying_hue(&mut self, saturation: f32, brightness: f32) {
        self.min_color = hsb(0.0, saturation, brightness);
        self.has_rainbow = true;
        self.update_stops();
    }

    pub fn set_gradient_varying_saturation(&mut self, hue: f32, brightness: f32) {
        self.has_rainbow = false;
        self.min_color = hsb(hue, 0.0, brightness);
        self.max_color = hsb(hue, 1.0, brightness);
        self.update_stops();
    }

    pub fn set_gradient_varying_brightness(&mut self, hue: f32, saturation: f32) {
        self.has_rainbow = false;
        self.min_color = gpui::black();
        self.max_color = hsb(hue, saturation, 1.0);
        self.update_stops();
    }

    pub fn set_gradient_varying_red(&mut self, green: f32, blue: f32) {
        self.has_rainbow = false;
        self.min_color = rgb_f32(0.0, green, blue);
        self.max_color = rgb_f32(1.0, green, blue);
        self.update_stops();
    }

    pub fn set_gradient_varying_green(&mut self, red: f32, blue: f32) {
        self.has_rainbow = false;
        self.min_color = rgb_f32(red, 0.0, blue);
        self.max_color = rgb_f32(red, 1.0, blue);
        self.update_stops();
    }

    pub fn set_gradient_varying_blue(&mut self, red: f32, green: f32) {
        self.has_rainbow = false;
        self.min_color = rgb_f32(red, green, 0.0);
        self.max_color = rgb_f32(red, green, 1.0);
        self.update_stops();
    }

    pub fn set_gradient_for_grayscale(&mut self) {
        self.has_rainbow = false;
        self.min_color = gpui::black();
        self.max_color = gpui::white();
        self.update_stops();
    }

    /// Sample the gradient at `position` (0.0 to 1.0) along the track.
    pub fn color_at(&self, position: f32) -> Hsla {
        let position = position.clamp(0.0, 1.0);
        let Some(first) = self.stops.first() else {
            return gpui::black();
        };
        if position <= first.location {
            return first.color;
        }

        for pair in self.stops.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            if position <= end.location {
                let span = end.location - start.location;
                if span <= f32::EPSILON {
                    return end.color;
                }
                let t = (position - start.location) / span;
                return interpolate_rgb(start.color, end.color, t);
            }
        }

        self.stops.last().map_or(first.color, |stop| stop.color)
    }

    fn update_stops(&mut self) {
        self.stops = if self.has_rainbow {
            Self::rainbow_stops(self.min_color)
        } else {
            vec![
                GradientStop {
                    color: self.min_color,
                    location: 0.0,
                },
                GradientStop {
                    color: self.max_color,
                    location: 1.0,
                },
            ]
        };
    }

    fn rainbow_stops(base: Hsla) -> Vec<GradientStop> {
        // Only saturation and brightness are taken from the base color.
        let Hsb { s, b, a, .. } = Hsb::from_hsla(base);
        let step = 1.0 / RAINBOW_SEGMENTS as f32;

        (0..=RAINBOW_SEGMENTS)
            .map(|i| {
                let location = step * i as f32;
                GradientStop {
                    color: Hsb::new(location, s, b, a).to_hsla(),
                    location,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_approx_eq {
        ($a:expr, $b:expr) => {
            assert!(
                ($a - $b).abs() < 1e-3,
                "assertion failed: `(left == right)` (left: `{:?}`, right: `{:?}`)",
                $a,
                $b
            );
        };
    }

    fn assert_rgb(color: Hsla, r: f32, g: f32, b: f32) {
        let rgba: Rgba = color.into();
        assert_approx_eq!(rgba.r, r);
        assert_approx_eq!(rgba.g, g);
        assert_approx_eq!(rgba.b, b);
    }

    #[test]
    fn hsb_conversion_round_trips_primaries() {
        let red = Hsb::from_rgba(Rgba {
            r: 1.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        });
        assert_approx_eq!(red.h, 0.0);
        assert_approx_eq!(red.s, 1.0);
        assert_approx_eq!(red.b, 1.0);

        let original = Hsb::new(0.4, 0.8, 0.6, 1.0);
        let back = Hsb::from_rgba(original.to_rgba());
        assert_approx_eq!(back.h, 0.4);
        assert_approx_eq!(back.s, 0.8);
        assert_approx_eq!(back.b, 0.6);
    }

    #[test]
    fn two_stops_without_rainbow() {
        let colors = TrackColors::default();
        assert_eq!(colors.stops().len(), 2);
        assert_eq!(colors.locations(), vec![0.0, 1.0]);
        assert_eq!(colors.colors(), vec![colors.min_color(), colors.max_color()]);
    }

    #[test]
    fn rainbow_spans_full_hue_with_min_color_saturation_and_brightness() {
        let mut colors = TrackColors::default();
        colors.set_min_color(hsb(0.7, 0.5, 0.8));
        colors.set_max_color(gpui::white());
        colors.set_has_rainbow(true);

        let stops = colors.stops();
        assert_eq!(stops.len(), RAINBOW_SEGMENTS + 1);
        assert_approx_eq!(stops[0].location, 0.0);
        assert_approx_eq!(stops[RAINBOW_SEGMENTS].location, 1.0);

        let step = 1.0 / RAINBOW_SEGMENTS as f32;
        for (i, stop) in stops.iter().enumerate() {
            assert_approx_eq!(stop.location, step * i as f32);
            let stop_hsb = Hsb::from_hsla(stop.color);
            assert_approx_eq!(stop_hsb.s, 0.5);
            assert_approx_eq!(stop_hsb.b, 0.8);
            // The last stop wraps back to red.
            if i > 0 && i < RAINBOW_SEGMENTS {
                assert_approx_eq!(stop_hsb.h, stop.location);
            }
        }
    }

    #[test]
    fn turning_rainbow_off_restores_two_stops() {
        let mut colors = TrackColors::default();
        colors.set_has_rainbow(true);
        colors.set_has_rainbow(false);
        assert_eq!(colors.stops().len(), 2);
    }

    #[test]
    fn convenience_gradients_only_touch_colors() {
        let mut colors = TrackColors::default();

        colors.set_gradient_varying_hue(1.0, 1.0);
        assert!(colors.has_rainbow());

        colors.set_gradient_varying_red(0.2, 0.4);
        assert!(!colors.has_rainbow());
        assert_rgb(colors.min_color(), 0.0, 0.2, 0.4);
        assert_rgb(colors.max_color(), 1.0, 0.2, 0.4);

        colors.set_gradient_varying_green(0.3, 0.1);
        assert_rgb(colors.min_color(), 0.3, 0.0, 0.1);
        assert_rgb(colors.max_color(), 0.3, 1.0, 0.1);

        colors.set_gradient_varying_blue(0.5, 0.6);
        assert_rgb(colors.min_color(), 0.5, 0.6, 0.0);
        assert_rgb(colors.max_color(), 0.5, 0.6, 1.0);

        colors.set_gradient_varying_brightness(0.0, 1.0);
        assert_rgb(colors.min_color(), 0.0, 0.0, 0.0);
        assert_rgb(colors.max_color(), 1.0, 0.0, 0.0);

        colors.set_gradient_varying_saturation(0.0, 1.0);
        assert_rgb(colors.min_color(), 1.0, 1.0, 1.0);
        assert_rgb(colors.max_color(), 1.0, 0.0, 0.0);

        colors.set_gradient_for_grayscale();
        assert_rgb(colors.min_color(), 0.0, 0.0, 0.0);
        assert_rgb(colors.max_color(), 1.0, 1.0, 1.0);
        assert_eq!(colors.stops().len(), 2);
    }

    #[test]
    fn color_at_interpolates_between_stops() {
        let mut colors = TrackColors::default();
        colors.set_gradient_for_grayscale();
        assert_rgb(colors.color_at(0.0), 0.0, 0.0, 0.0);
        assert_rgb(colors.color_at(0.5), 0.5, 0.5, 0.5);
        assert_rgb(colors.color_at(1.0), 1.0, 1.0, 1.0);
        assert_rgb(colors.color_at(7.0), 1.0, 1.0, 1.0);
    }
}
