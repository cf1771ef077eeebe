//! Tunable interaction constants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance added around zero-area geometry (lines, strokes, text boxes).
pub const STROKE_PADDING: f64 = 5.0;
/// Radius around a transform handle that counts as a hit.
pub const HANDLE_HIT_RADIUS: f64 = 8.0;
/// Distance from the top edge to the rotation handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 30.0;
/// Smallest width/height a resize can produce.
pub const MIN_ELEMENT_SIZE: f64 = 10.0;
/// A marquee must exceed this size on both axes to select anything.
pub const CLICK_THRESHOLD: f64 = 5.0;
/// Opacity of the live preview while a transform is in progress.
pub const TRANSFORM_PREVIEW_OPACITY: f64 = 0.6;
/// Zoom limits for the viewport.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid interaction config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Interaction tuning shared by the hit-testing, selection and transform engines.
///
/// Every field falls back to its default when missing from JSON, so a partial
/// config only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub stroke_padding: f64,
    pub handle_radius: f64,
    pub rotate_handle_offset: f64,
    pub min_element_size: f64,
    pub click_threshold: f64,
    pub transform_preview_opacity: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            stroke_padding: STROKE_PADDING,
            handle_radius: HANDLE_HIT_RADIUS,
            rotate_handle_offset: ROTATE_HANDLE_OFFSET,
            min_element_size: MIN_ELEMENT_SIZE,
            click_threshold: CLICK_THRESHOLD,
            transform_preview_opacity: TRANSFORM_PREVIEW_OPACITY,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl InteractionConfig {
    /// Parse a config from JSON and check its ranges.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the engines cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("stroke_padding", self.stroke_padding),
            ("handle_radius", self.handle_radius),
            ("rotate_handle_offset", self.rotate_handle_offset),
            ("min_element_size", self.min_element_size),
            ("click_threshold", self.click_threshold),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.transform_preview_opacity) {
            return Err(ConfigError::OutOfRange {
                field: "transform_preview_opacity",
                value: self.transform_preview_opacity,
            });
        }
        if !self.min_zoom.is_finite() || self.min_zoom <= 0.0 {
            return Err(ConfigError::OutOfRange { field: "min_zoom", value: self.min_zoom });
        }
        if !self.max_zoom.is_finite() || self.max_zoom < self.min_zoom {
            return Err(ConfigError::OutOfRange { field: "max_zoom", value: self.max_zoom });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = InteractionConfig::from_json(r#"{ "handle_radius": 12.0 }"#).unwrap();
        assert!((config.handle_radius - 12.0).abs() < f64::EPSILON);
        assert!((config.stroke_padding - STROKE_PADDING).abs() < f64::EPSILON);
        assert!((config.min_element_size - MIN_ELEMENT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_negative_padding() {
        let err = InteractionConfig::from_json(r#"{ "stroke_padding": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "stroke_padding", .. }));
    }

    #[test]
    fn test_rejects_inverted_zoom_range() {
        let err = InteractionConfig::from_json(r#"{ "min_zoom": 2.0, "max_zoom": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "max_zoom", .. }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            InteractionConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}
