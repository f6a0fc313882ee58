//! Per-layer field configuration.
//!
//! Each canvas owns one [`FieldConfig`]. The three page layers start from the
//! presets below; the host may pass a JSON document whose per-layer objects are
//! merged key by key over those presets, so `{"background": {"count": 60}}`
//! only changes the background particle count.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::{GLOW_BLUR, TRAIL_FADE};
use crate::error::ConfigError;

/// Configuration for one particle layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    /// Number of particles; fixed for the life of the field.
    pub count: usize,
    /// Whether pointer attraction and release dynamics apply.
    pub interactive: bool,
    /// Smallest particle radius.
    pub radius_min: f64,
    /// Random extra radius added on top of `radius_min`.
    pub radius_span: f64,
    /// Drift components are drawn from `(r - 0.5) * drift_spread`.
    pub drift_spread: f64,
    /// Initial impulse components are drawn from `(r - 0.5) * impulse_spread`.
    pub impulse_spread: f64,
    /// Fill used to fade the previous frame; `None` clears the canvas instead.
    pub trail_fade: Option<String>,
    /// Fixed particle colour; `None` follows the page theme.
    pub fill: Option<String>,
    /// Shadow colour; `None` reuses the fill colour.
    pub glow_color: Option<String>,
    /// Shadow blur; zero disables the glow.
    pub glow_blur: f64,
    /// Draw proximity links between particles.
    pub links: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::interactive()
    }
}

impl FieldConfig {
    /// Foreground layer: pointer-reactive, theme-coloured, with trails and links.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            count: 70,
            interactive: true,
            radius_min: 1.0,
            radius_span: 2.0,
            drift_spread: 0.5,
            impulse_spread: 0.3,
            trail_fade: Some(TRAIL_FADE.to_owned()),
            fill: None,
            glow_color: None,
            glow_blur: GLOW_BLUR,
            links: true,
        }
    }

    /// Soft-light background layer: larger, slower, glowing white dots.
    #[must_use]
    pub fn background() -> Self {
        Self {
            count: 120,
            interactive: false,
            radius_min: 1.0,
            radius_span: 3.0,
            drift_spread: 0.2,
            impulse_spread: 0.0,
            trail_fade: None,
            fill: Some("rgba(255, 255, 255, 0.6)".to_owned()),
            glow_color: Some("#fff".to_owned()),
            glow_blur: GLOW_BLUR,
            links: false,
        }
    }

    /// Top overlay layer: plain translucent dots without glow.
    #[must_use]
    pub fn extra() -> Self {
        Self {
            count: 100,
            interactive: false,
            radius_min: 1.0,
            radius_span: 2.0,
            drift_spread: 0.3,
            impulse_spread: 0.0,
            trail_fade: None,
            fill: Some("rgba(255,255,255,0.5)".to_owned()),
            glow_color: None,
            glow_blur: 0.0,
            links: false,
        }
    }

    /// Parse a complete layer configuration from JSON.
    ///
    /// Every field must be present and unknown keys are rejected; use
    /// [`FieldSetConfig::from_json`] for partial overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, missing or unknown
    /// keys, and
    /// [`ConfigError::Invalid`] when a value fails [`FieldConfig::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the simulation can run with these values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::Invalid { field: "count", reason: "must be at least 1" });
        }
        if !(self.radius_min.is_finite() && self.radius_min > 0.0) {
            return Err(ConfigError::Invalid { field: "radius_min", reason: "must be a positive number" });
        }
        let non_negative = [
            ("radius_span", self.radius_span),
            ("drift_spread", self.drift_spread),
            ("impulse_spread", self.impulse_spread),
            ("glow_blur", self.glow_blur),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid { field, reason: "must be a non-negative number" });
            }
        }
        Ok(())
    }
}

/// Configuration for the three page layers.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSetConfig {
    /// The pointer-reactive `particles` canvas.
    pub foreground: FieldConfig,
    /// The `particles-background` canvas.
    pub background: FieldConfig,
    /// The `extra-particles` canvas.
    pub extra: FieldConfig,
}

impl Default for FieldSetConfig {
    fn default() -> Self {
        Self {
            foreground: FieldConfig::interactive(),
            background: FieldConfig::background(),
            extra: FieldConfig::extra(),
        }
    }
}

impl FieldSetConfig {
    /// Parse layer overrides and merge them over the presets.
    ///
    /// Accepts an object with optional `foreground`, `background` and `extra`
    /// members. Keys inside a member replace the preset's value; a `null`
    /// value resets an optional setting to `None`. Unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a JSON object of
    /// layer objects, and [`ConfigError::Invalid`] if a merged layer fails
    /// validation.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let root: serde_json::Map<String, Value> = serde_json::from_str(text)?;
        let defaults = Self::default();
        Ok(Self {
            foreground: merge_layer(defaults.foreground, root.get("foreground"))?,
            background: merge_layer(defaults.background, root.get("background"))?,
            extra: merge_layer(defaults.extra, root.get("extra"))?,
        })
    }
}

fn merge_layer(preset: FieldConfig, patch: Option<&Value>) -> Result<FieldConfig, ConfigError> {
    let Some(patch) = patch else {
        return Ok(preset);
    };
    let mut merged = serde_json::to_value(&preset)?;
    let overrides: serde_json::Map<String, Value> = serde_json::from_value(patch.clone())?;
    if let Some(existing) = merged.as_object_mut() {
        for (key, value) in overrides {
            existing.insert(key, value);
        }
    }
    let config: FieldConfig = serde_json::from_value(merged)?;
    config.validate()?;
    Ok(config)
}
