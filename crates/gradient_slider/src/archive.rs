//! Persisted form of a slider's configuration.
//!
//! Every field is optional on decode and falls back to a documented default,
//! so archives written by older versions keep loading.

use anyhow::{Context as _, Result, anyhow};
use gpui::{Hsla, Rgba};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{defaults, image::SliderImage, model::SliderModel};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArchivedImage {
    pub source: String,
    pub width: f32,
    pub height: f32,
}

impl From<&SliderImage> for ArchivedImage {
    fn from(image: &SliderImage) -> Self {
        Self {
            source: image.source.to_string(),
            width: image.width,
            height: image.height,
        }
    }
}

impl From<&ArchivedImage> for SliderImage {
    fn from(image: &ArchivedImage) -> Self {
        SliderImage::new(image.source.clone(), image.width, image.height)
    }
}

/// The serialized slider.
///
/// Colors are stored as `#rrggbbaa` hex strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderArchive {
    pub min_color: Option<String>,
    pub max_color: Option<String>,
    pub value: f32,
    pub minimum_value: f32,
    pub maximum_value: f32,
    pub minimum_value_image: Option<ArchivedImage>,
    pub maximum_value_image: Option<ArchivedImage>,
    pub thickness: f32,
    pub thumb_icon: Option<ArchivedImage>,
    pub has_rainbow: bool,
    pub continuous: bool,
    pub thumb_size: f32,
    pub thumb_color: Option<String>,
    pub track_border_color: Option<String>,
    pub track_border_width: f32,
}

impl Default for SliderArchive {
    fn default() -> Self {
        Self {
            min_color: None,
            max_color: None,
            value: defaults::VALUE,
            minimum_value: defaults::MINIMUM_VALUE,
            maximum_value: defaults::MAXIMUM_VALUE,
            minimum_value_image: None,
            maximum_value_image: None,
            thickness: defaults::THICKNESS,
            thumb_icon: None,
            has_rainbow: false,
            continuous: true,
            thumb_size: defaults::THUMB_SIZE,
            thumb_color: None,
            track_border_color: None,
            track_border_width: defaults::TRACK_BORDER_WIDTH,
        }
    }
}

impl SliderArchive {
    pub fn from_model(model: &SliderModel) -> Self {
        Self {
            min_color: Some(color_to_hex(model.colors().min_color())),
            max_color: Some(color_to_hex(model.colors().max_color())),
            value: model.value(),
            minimum_value: model.minimum_value(),
            maximum_value: model.maximum_value(),
            minimum_value_image: model.min_image().map(Into::into),
            maximum_value_image: model.max_image().map(Into::into),
            thickness: model.thickness(),
            thumb_icon: model.thumb_icon().map(Into::into),
            has_rainbow: model.colors().has_rainbow(),
            continuous: model.continuous(),
            thumb_size: model.thumb_size(),
            thumb_color: Some(color_to_hex(model.thumb_color())),
            track_border_color: Some(color_to_hex(model.track_border_color())),
            track_border_width: model.track_border_width(),
        }
    }

    /// Build a model from the archive, substituting defaults for malformed colors.
    pub fn to_model(&self) -> SliderModel {
        let mut model = SliderModel::new();
        self.apply_to(&mut model);
        model
    }

    pub fn apply_to(&self, model: &mut SliderModel) {
        let colors = model.colors_mut();
        colors.set_min_color(decode_color(
            "minColor",
            self.min_color.as_deref(),
            defaults::archived_min_color(),
        ));
        colors.set_max_color(decode_color(
            "maxColor",
            self.max_color.as_deref(),
            defaults::archived_max_color(),
        ));
        colors.set_has_rainbow(self.has_rainbow);

        // Bounds first, so the value is not clamped against the previous range.
        model.set_range(self.minimum_value, self.maximum_value);
        model.set_value(self.value);

        model.set_min_image(self.minimum_value_image.as_ref().map(Into::into));
        model.set_max_image(self.maximum_value_image.as_ref().map(Into::into));
        model.set_thickness(self.thickness);
        model.set_thumb_size(self.thumb_size);
        model.set_continuous(self.continuous);
        model.set_track_border(
            decode_color(
                "trackBorderColor",
                self.track_border_color.as_deref(),
                defaults::track_border_color(),
            ),
            self.track_border_width,
        );

        // The color clears the icon, so it has to go first.
        model.set_thumb_color(decode_color(
            "thumbColor",
            self.thumb_color.as_deref(),
            defaults::thumb_color(),
        ));
        model.set_thumb_icon(self.thumb_icon.as_ref().map(Into::into));
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to encode slider archive")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to decode slider archive")
    }

    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(SliderArchive)
    }
}

fn decode_color(key: &str, hex: Option<&str>, default: Hsla) -> Hsla {
    let Some(hex) = hex else {
        return default;
    };

    match color_from_hex(hex) {
        Ok(color) => color,
        Err(err) => {
            tracing::warn!("invalid {} in slider archive, using default: {:?}", key, err);
            default
        }
    }
}

pub fn color_to_hex(color: Hsla) -> String {
    let rgba: Rgba = color.into();
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        channel(rgba.r),
        channel(rgba.g),
        channel(rgba.b),
        channel(rgba.a)
    )
}

/// Parse `#rrggbb` or `#rrggbbaa`.
pub fn color_from_hex(hex: &str) -> Result<Hsla> {
    let digits = hex.trim().trim_start_matches('#');
    if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
        return Err(anyhow!("expected #rrggbb or #rrggbbaa, got {:?}", hex));
    }

    let channel = |index: usize| -> Result<f32> {
        let byte = u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16)
            .with_context(|| format!("invalid hex color {:?}", hex))?;
        Ok(byte as f32 / 255.0)
    };

    let alpha = if digits.len() == 8 { channel(3)? } else { 1.0 };
    Ok(Rgba {
        r: channel(0)?,
        g: channel(1)?,
        b: channel(2)?,
        a: alpha,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn approx_eq(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-2, "expected {a} ~= {b}");
    }

    fn assert_same_color(a: Hsla, b: Hsla) {
        let (a, b): (Rgba, Rgba) = (a.into(), b.into());
        approx_eq(a.r, b.r);
        approx_eq(a.g, b.g);
        approx_eq(a.b, b.b);
        approx_eq(a.a, b.a);
    }

    #[test]
    fn empty_archive_uses_decoder_defaults() {
        let archive = SliderArchive::from_json("{}").unwrap();
        let model = archive.to_model();

        assert_same_color(model.colors().min_color(), defaults::archived_min_color());
        assert_same_color(model.colors().max_color(), defaults::archived_max_color());
        approx_eq(model.value(), 0.0);
        approx_eq(model.minimum_value(), 0.0);
        approx_eq(model.maximum_value(), 1.0);
        approx_eq(model.thickness(), 2.0);
        assert!(model.min_image().is_none());
        assert!(model.thumb_icon().is_none());
        assert!(model.continuous());
        assert!(!model.colors().has_rainbow());
    }

    #[test]
    fn decodes_a_full_archive() {
        let json = indoc! {r##"
            {
                "minColor": "#ff0000",
                "maxColor": "#0000ffff",
                "value": 40.0,
                "minimumValue": 10.0,
                "maximumValue": 50.0,
                "minimumValueImage": { "source": "min.png", "width": 20.0, "height": 18.0 },
                "thickness": 6.0,
                "thumbIcon": { "source": "thumb.png", "width": 12.0, "height": 12.0 },
                "hasRainbow": true,
                "continuous": false
            }
        "##};

        let model = SliderArchive::from_json(json).unwrap().to_model();
        assert_same_color(model.colors().min_color(), gpui::red());
        approx_eq(model.value(), 40.0);
        approx_eq(model.minimum_value(), 10.0);
        approx_eq(model.maximum_value(), 50.0);
        approx_eq(model.thickness(), 6.0);
        assert_eq!(model.min_image().map(|image| image.width), Some(20.0));
        assert!(model.max_image().is_none());
        assert_eq!(
            model.thumb_icon().map(|icon| icon.source.to_string()),
            Some("thumb.png".to_string())
        );
        assert!(model.colors().has_rainbow());
        assert!(!model.continuous());
    }

    #[test]
    fn malformed_color_falls_back_to_default() {
        let json = r##"{ "minColor": "not a color", "maxColor": "#12" }"##;
        let model = SliderArchive::from_json(json).unwrap().to_model();
        assert_same_color(model.colors().min_color(), defaults::archived_min_color());
        assert_same_color(model.colors().max_color(), defaults::archived_max_color());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SliderArchive::from_json("{ value: ").is_err());
    }

    #[test]
    fn encode_then_decode_preserves_configuration() {
        let mut model = SliderModel::new();
        model.set_minimum_value(-1.0);
        model.set_maximum_value(3.0);
        model.set_value(2.0);
        model.set_thickness(4.0);
        model.colors_mut().set_gradient_varying_hue(0.5, 0.9);
        model.set_max_image(Some(SliderImage::new("max.png", 16.0, 16.0)));
        model.set_continuous(false);

        let json = SliderArchive::from_model(&model).to_json().unwrap();
        let decoded = SliderArchive::from_json(&json).unwrap().to_model();

        approx_eq(decoded.value(), 2.0);
        approx_eq(decoded.minimum_value(), -1.0);
        approx_eq(decoded.maximum_value(), 3.0);
        approx_eq(decoded.thickness(), 4.0);
        assert_eq!(decoded.max_image(), model.max_image());
        assert!(decoded.colors().has_rainbow());
        assert!(!decoded.continuous());
        assert_eq!(decoded.stops().len(), model.stops().len());
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(color_to_hex(gpui::white()), "#ffffffff");
        assert_same_color(color_from_hex("#336699").unwrap(), color_from_hex("#336699ff").unwrap());
        assert!(color_from_hex("#gg0000").is_err());
    }

    #[test]
    fn schema_names_the_persisted_keys() {
        let schema = serde_json::to_value(SliderArchive::json_schema()).unwrap();
        let properties = &schema["properties"];
        for key in ["minColor", "maxColor", "value", "minimumValueImage", "thumbIcon"] {
            assert!(properties.get(key).is_some(), "missing {key}");
        }
    }
}
