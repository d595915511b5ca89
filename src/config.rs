//! Session parameters.
//!
//! A [`Configuration`] is built once from built-in defaults plus an optional
//! [`ConfigOverrides`] record (the fetched `config.json`, or the settings panel),
//! and is never mutated afterwards. Applying new settings produces a new value
//! and a relayout.

use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound for the positional jitter fraction. Values above 1 let a word
/// wander past its own tile.
pub const MAX_JITTER: f64 = 20.0;

/// Most words a single layout will hold.
pub const MAX_WORDS: usize = 2000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_light(self) -> bool {
        matches!(self, Theme::Light)
    }
}

/// Per-axis pair used for amplitude, frequency and jitter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Axes {
    pub x: f64,
    pub y: f64,
}

impl Axes {
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }
}

/// Inclusive `[min, max]` range interpolated over ratings 1..=5.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RatingRange {
    pub min: f64,
    pub max: f64,
}

impl RatingRange {
    /// Linear interpolation: rating 1 → `min`, rating 5 → `max`.
    pub fn at(&self, rating: u8) -> f64 {
        let t = (f64::from(rating.clamp(1, 5)) - 1.0) / 4.0;
        self.min * (1.0 - t) + self.max * t
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Configuration {
    pub word_count: usize,
    /// Oscillation amplitude in px.
    pub amplitude: Axes,
    /// Oscillation frequency in radians per millisecond.
    pub frequency: Axes,
    /// Scale of a tile's half-extent bounding the random offset.
    pub jitter: Axes,
    pub lightness_dark: f64,
    pub lightness_light: f64,
    pub glow_frequency: f64,
    pub glow_amplitude: f64,
    pub dark_background: String,
    pub light_background: String,
    /// Fixed base font size in px; `None` sizes the font from the layout.
    pub font_size: Option<f64>,
    pub size_multiplier: RatingRange,
    pub lightness_boost: RatingRange,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            word_count: 100,
            amplitude: Axes::splat(18.0),
            frequency: Axes::splat(0.0018),
            jitter: Axes::splat(1.0),
            lightness_dark: 0.8,
            lightness_light: 0.2,
            glow_frequency: 0.001,
            glow_amplitude: 0.15,
            dark_background: "#0f1724".to_string(),
            light_background: "#f7fafc".to_string(),
            font_size: None,
            size_multiplier: RatingRange { min: 1.1, max: 1.6 },
            lightness_boost: RatingRange { min: 0.05, max: 0.25 },
        }
    }
}

impl Configuration {
    /// Defaults merged with `overrides` (absent fields keep their default).
    pub fn resolve(overrides: Option<&ConfigOverrides>) -> Self {
        match overrides {
            Some(o) => Self::default().with_overrides(o),
            None => Self::default(),
        }
    }

    /// A new configuration with every present field of `o` applied on top of `self`.
    pub fn with_overrides(&self, o: &ConfigOverrides) -> Self {
        let mut c = self.clone();
        if let Some(n) = o.word_count {
            if n.is_finite() && n >= 1.0 {
                c.word_count = (n as usize).min(MAX_WORDS);
            }
        }
        set(&mut c.amplitude.x, o.amplitude_x);
        set(&mut c.amplitude.y, o.amplitude_y);
        set(&mut c.frequency.x, o.frequency_x);
        set(&mut c.frequency.y, o.frequency_y);
        set(&mut c.jitter.x, o.x_randomness);
        set(&mut c.jitter.y, o.y_randomness);
        set(&mut c.lightness_dark, o.lightness_dark);
        set(&mut c.lightness_light, o.lightness_light);
        set(&mut c.glow_frequency, o.glow_freq);
        set(&mut c.glow_amplitude, o.glow_amp);
        if let Some(bg) = &o.dark_bg_color {
            c.dark_background = bg.clone();
        }
        if let Some(bg) = &o.light_bg_color {
            c.light_background = bg.clone();
        }
        if o.font_size.is_some() {
            c.font_size = o.font_size.filter(|px| *px > 0.0);
        }
        set(&mut c.size_multiplier.min, o.size_multiplier_min);
        set(&mut c.size_multiplier.max, o.size_multiplier_max);
        set(&mut c.lightness_boost.min, o.lightness_boost_min);
        set(&mut c.lightness_boost.max, o.lightness_boost_max);
        c.jitter.x = sanitize_jitter(c.jitter.x);
        c.jitter.y = sanitize_jitter(c.jitter.y);
        c
    }

    /// Base lightness for the given theme.
    pub fn base_lightness(&self, theme: Theme) -> f64 {
        match theme {
            Theme::Dark => self.lightness_dark,
            Theme::Light => self.lightness_light,
        }
    }

    pub fn background(&self, theme: Theme) -> &str {
        match theme {
            Theme::Dark => &self.dark_background,
            Theme::Light => &self.light_background,
        }
    }
}

fn set(slot: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn sanitize_jitter(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, MAX_JITTER) }
}

/// Optional overrides, deserialised from `config.json` or assembled from the
/// settings panel. Fields carrying a JSON value of the wrong type are treated
/// as absent instead of failing the whole record.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(deserialize_with = "lenient_number")]
    pub word_count: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub amplitude_x: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub amplitude_y: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub frequency_x: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub frequency_y: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub x_randomness: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub y_randomness: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub lightness_dark: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub lightness_light: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub glow_freq: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub glow_amp: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub dark_bg_color: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub light_bg_color: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub font_size: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub size_multiplier_min: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub size_multiplier_max: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub lightness_boost_min: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub lightness_boost_max: Option<f64>,
}

impl ConfigOverrides {
    pub fn from_json(text: &str) -> crate::FieldResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    Ok(v.as_f64())
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    Ok(v.as_str().map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_without_overrides_is_default() {
        assert_eq!(Configuration::resolve(None), Configuration::default());
    }

    #[test]
    fn overrides_apply_only_present_fields() {
        let o = ConfigOverrides::from_json(r#"{"amplitudeX": 30, "glowAmp": 0.4}"#).unwrap();
        let c = Configuration::resolve(Some(&o));
        assert_eq!(c.amplitude.x, 30.0);
        assert_eq!(c.amplitude.y, 18.0);
        assert_eq!(c.glow_amplitude, 0.4);
        assert_eq!(c.frequency, Axes::splat(0.0018));
    }

    #[test]
    fn wrong_typed_fields_are_ignored() {
        let o = ConfigOverrides::from_json(
            r##"{"amplitudeX": "big", "darkBgColor": 12, "lightBgColor": "#fff", "unknown": true}"##,
        )
        .unwrap();
        assert_eq!(o.amplitude_x, None);
        assert_eq!(o.dark_bg_color, None);
        let c = Configuration::resolve(Some(&o));
        assert_eq!(c.light_background, "#fff");
        assert_eq!(c.dark_background, "#0f1724");
    }

    #[test]
    fn jitter_is_not_limited_to_unit_range() {
        let o = ConfigOverrides {
            x_randomness: Some(3.5),
            y_randomness: Some(-2.0),
            ..Default::default()
        };
        let c = Configuration::resolve(Some(&o));
        assert_eq!(c.jitter.x, 3.5);
        assert_eq!(c.jitter.y, 0.0);

        let huge = ConfigOverrides {
            x_randomness: Some(500.0),
            y_randomness: Some(f64::NAN),
            ..Default::default()
        };
        let c = Configuration::resolve(Some(&huge));
        assert_eq!(c.jitter.x, MAX_JITTER);
        assert_eq!(c.jitter.y, 0.0);
    }

    #[test]
    fn word_count_is_capped() {
        let o = ConfigOverrides::from_json(r#"{"wordCount": 1e30}"#).unwrap();
        assert_eq!(Configuration::resolve(Some(&o)).word_count, MAX_WORDS);

        let o = ConfigOverrides::from_json(r#"{"wordCount": 250}"#).unwrap();
        assert_eq!(Configuration::resolve(Some(&o)).word_count, 250);

        let o = ConfigOverrides::from_json(r#"{"wordCount": 0}"#).unwrap();
        assert_eq!(Configuration::resolve(Some(&o)).word_count, 100);
    }

    #[test]
    fn rating_range_interpolates_linearly() {
        let r = RatingRange { min: 1.0, max: 2.0 };
        assert_eq!(r.at(1), 1.0);
        assert_eq!(r.at(5), 2.0);
        assert_eq!(r.at(3), 1.5);
    }

    #[test]
    fn theme_selects_lightness_and_background() {
        let c = Configuration::default();
        assert_eq!(c.base_lightness(Theme::Dark), 0.8);
        assert_eq!(c.base_lightness(Theme::Light), 0.2);
        assert_eq!(c.background(Theme::Light), "#f7fafc");
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ConfigOverrides::from_json("{not json").is_err());
    }
}
