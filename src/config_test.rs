#![allow(clippy::float_cmp)]

use super::*;

// --- presets ---

#[test]
fn presets_have_page_counts() {
    assert_eq!(FieldConfig::interactive().count, 70);
    assert_eq!(FieldConfig::background().count, 120);
    assert_eq!(FieldConfig::extra().count, 100);
}

#[test]
fn only_foreground_is_interactive_and_theme_driven() {
    let set = FieldSetConfig::default();
    assert!(set.foreground.interactive);
    assert!(set.foreground.fill.is_none());
    assert!(set.foreground.links);
    for layer in [&set.background, &set.extra] {
        assert!(!layer.interactive);
        assert!(layer.fill.is_some());
        assert!(!layer.links);
        assert!(layer.trail_fade.is_none());
        assert_eq!(layer.impulse_spread, 0.0);
    }
}

#[test]
fn presets_validate() {
    for config in [FieldConfig::interactive(), FieldConfig::background(), FieldConfig::extra()] {
        assert!(config.validate().is_ok());
    }
}

#[test]
fn default_is_interactive() {
    assert_eq!(FieldConfig::default(), FieldConfig::interactive());
}

// --- validate ---

#[test]
fn zero_count_is_invalid() {
    let config = FieldConfig { count: 0, ..FieldConfig::extra() };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "count", .. })));
}

#[test]
fn non_positive_radius_is_invalid() {
    let config = FieldConfig { radius_min: 0.0, ..FieldConfig::extra() };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "radius_min", .. })));
}

#[test]
fn negative_or_nan_spread_is_invalid() {
    let config = FieldConfig { drift_spread: -0.1, ..FieldConfig::extra() };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "drift_spread", .. })));
    let config = FieldConfig { glow_blur: f64::NAN, ..FieldConfig::extra() };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "glow_blur", .. })));
}

// --- FieldConfig::from_json ---

#[test]
fn layer_json_matches_serialized_preset() {
    let text = serde_json::to_string(&FieldConfig::background()).unwrap();
    assert_eq!(FieldConfig::from_json(&text).unwrap(), FieldConfig::background());
}

#[test]
fn layer_json_missing_field_is_parse_error() {
    assert!(matches!(FieldConfig::from_json(r#"{"count": 5}"#), Err(ConfigError::Parse(_))));
}

// --- FieldSetConfig::from_json ---

#[test]
fn empty_object_yields_presets() {
    assert_eq!(FieldSetConfig::from_json("{}").unwrap(), FieldSetConfig::default());
}

#[test]
fn partial_override_only_touches_named_keys() {
    let set = FieldSetConfig::from_json(r#"{"background": {"count": 60, "drift_spread": 0.1}}"#).unwrap();
    assert_eq!(set.background.count, 60);
    assert_eq!(set.background.drift_spread, 0.1);
    assert_eq!(set.background.radius_span, 3.0);
    assert_eq!(set.foreground, FieldConfig::interactive());
    assert_eq!(set.extra, FieldConfig::extra());
}

#[test]
fn null_resets_optional_setting() {
    let set = FieldSetConfig::from_json(r#"{"foreground": {"trail_fade": null, "links": false}}"#).unwrap();
    assert!(set.foreground.trail_fade.is_none());
    assert!(!set.foreground.links);
    assert!(set.foreground.interactive);
}

#[test]
fn fixed_fill_override_stops_theme_tracking() {
    let set = FieldSetConfig::from_json(r##"{"foreground": {"fill": "#ff0000"}}"##).unwrap();
    assert_eq!(set.foreground.fill.as_deref(), Some("#ff0000"));
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(FieldSetConfig::from_json("{not json"), Err(ConfigError::Parse(_))));
    assert!(matches!(FieldSetConfig::from_json("[1, 2]"), Err(ConfigError::Parse(_))));
    assert!(matches!(FieldSetConfig::from_json(r#"{"extra": 5}"#), Err(ConfigError::Parse(_))));
}

#[test]
fn wrong_value_type_is_parse_error() {
    let result = FieldSetConfig::from_json(r#"{"extra": {"count": "many"}}"#);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn misspelled_override_key_is_rejected() {
    let result = FieldSetConfig::from_json(r#"{"background": {"cout": 60}}"#);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn layer_json_unknown_key_is_parse_error() {
    let mut value = serde_json::to_value(FieldConfig::extra()).unwrap();
    value["speed"] = serde_json::json!(2.0);
    let result = FieldConfig::from_json(&value.to_string());
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn merged_layer_is_validated() {
    let result = FieldSetConfig::from_json(r#"{"extra": {"count": 0}}"#);
    assert!(matches!(result, Err(ConfigError::Invalid { field: "count", .. })));
}
