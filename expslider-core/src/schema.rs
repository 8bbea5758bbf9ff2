//! Frame schema contract — the boundary between the experiment file and a frame.
//!
//! Declares which properties a frame kind accepts, their JSON types, numeric
//! ranges, defaults, and which are required. The session host validates a
//! frame's properties against this before mounting, and the frame checks again
//! at mount so a configuration that slipped past the host still fails fast.
//!
//! The data schema declares the fields a frame emits to the persistence layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::config::{RESPONSE_MAX, RESPONSE_MIN};
use crate::lifecycle::Properties;

/// JSON types a frame property can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
}

impl PropertyType {
    pub fn name(self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            PropertyType::String => value.is_string(),
            PropertyType::Number => value.is_number(),
            PropertyType::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default value of an optional property or an emitted data field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Number(f64),
    Boolean(bool),
    Text(&'static str),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Number(n) => json!(n),
            DefaultValue::Boolean(b) => Value::Bool(b),
            DefaultValue::Text(s) => Value::String(s.to_string()),
        }
    }
}

/// A single declared frame property.
#[derive(Debug, Clone, Copy)]
pub struct PropertySchema {
    pub name: &'static str,
    pub kind: PropertyType,
    pub required: bool,
    pub default: Option<DefaultValue>,
    /// Inclusive numeric range, for `Number` properties.
    pub range: Option<(f64, f64)>,
    pub description: &'static str,
}

/// Declared configuration schema of one frame kind.
#[derive(Debug, Clone, Copy)]
pub struct FrameSchema {
    pub kind: &'static str,
    pub properties: &'static [PropertySchema],
}

/// The slider frame's configuration schema.
///
/// - Required: title, labelLeft, labelRight, initialValue, feedback
/// - Optional: feedbackValue (default 0)
/// - Numeric fields are bounded to [0, 100]
pub const SLIDER_FRAME_SCHEMA: FrameSchema = FrameSchema {
    kind: "exp-slider",
    properties: &[
        PropertySchema {
            name: "title",
            kind: PropertyType::String,
            required: true,
            default: None,
            range: None,
            description: "Title text for the slider.",
        },
        PropertySchema {
            name: "labelLeft",
            kind: PropertyType::String,
            required: true,
            default: None,
            range: None,
            description: "Label for the left end of the slider.",
        },
        PropertySchema {
            name: "labelRight",
            kind: PropertyType::String,
            required: true,
            default: None,
            range: None,
            description: "Label for the right end of the slider.",
        },
        PropertySchema {
            name: "initialValue",
            kind: PropertyType::Number,
            required: true,
            default: None,
            range: Some((RESPONSE_MIN, RESPONSE_MAX)),
            description: "Initial value of the slider.",
        },
        PropertySchema {
            name: "feedback",
            kind: PropertyType::Boolean,
            required: true,
            default: None,
            range: None,
            description: "Whether this frame shows feedback instead of collecting a response.",
        },
        PropertySchema {
            name: "feedbackValue",
            kind: PropertyType::Number,
            required: false,
            default: Some(DefaultValue::Number(0.0)),
            range: Some((RESPONSE_MIN, RESPONSE_MAX)),
            description: "Position of the feedback (reference) handle.",
        },
    ],
};

/// One problem found in a frame configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("missing required property '{0}'")]
    Missing(String),

    #[error("property '{name}': expected {expected}, got {found}")]
    WrongType {
        name: String,
        expected: PropertyType,
        found: &'static str,
    },

    #[error("property '{name}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("malformed configuration: {0}")]
    Malformed(String),
}

/// A configuration that cannot be mounted. Carries every issue found.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid configuration: {}", join_issues(.issues))]
pub struct ConfigError {
    pub issues: Vec<ConfigIssue>,
}

impl ConfigError {
    /// `Ok(())` when there are no issues, otherwise an error carrying all of them.
    pub fn from_issues(issues: Vec<ConfigIssue>) -> Result<(), ConfigError> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError { issues })
        }
    }

    /// Whether the named required property was missing.
    pub fn is_missing(&self, name: &str) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, ConfigIssue::Missing(n) if n == name))
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result of schema validation.
#[derive(Debug, Clone)]
pub struct SchemaValidation {
    pub is_valid: bool,
    pub issues: Vec<ConfigIssue>,
}

impl SchemaValidation {
    pub fn into_result(self) -> Result<(), ConfigError> {
        ConfigError::from_issues(self.issues)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl FrameSchema {
    pub fn required(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
    }

    /// Validate a property map against this schema.
    ///
    /// Every declared property is checked; all issues are collected rather than
    /// stopping at the first. Undeclared properties are ignored, since hosts
    /// attach their own bookkeeping keys to frame definitions.
    pub fn validate(&self, properties: &Properties) -> SchemaValidation {
        let mut issues = Vec::new();

        for expected in self.properties {
            let Some(value) = properties.get(expected.name) else {
                if expected.required {
                    issues.push(ConfigIssue::Missing(expected.name.to_string()));
                }
                continue;
            };

            if !expected.kind.matches(value) {
                issues.push(ConfigIssue::WrongType {
                    name: expected.name.to_string(),
                    expected: expected.kind,
                    found: value_kind(value),
                });
                continue;
            }

            if let (Some((min, max)), Some(n)) = (expected.range, value.as_f64()) {
                if !(min..=max).contains(&n) {
                    issues.push(ConfigIssue::OutOfRange {
                        name: expected.name.to_string(),
                        value: n,
                        min,
                        max,
                    });
                }
            }
        }

        SchemaValidation {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    /// Copy of `properties` with defaults filled in for absent optional properties.
    pub fn apply_defaults(&self, properties: &Properties) -> Properties {
        let mut out = properties.clone();
        for prop in self.properties {
            if let Some(default) = prop.default {
                out.entry(prop.name.to_string())
                    .or_insert_with(|| default.to_value());
            }
        }
        out
    }

    /// JSON-schema style description, as published to experiment authors.
    pub fn to_json(&self) -> Value {
        let mut props = Map::new();
        for prop in self.properties {
            let mut entry = Map::new();
            entry.insert("type".into(), Value::String(prop.kind.name().into()));
            if let Some(default) = prop.default {
                entry.insert("default".into(), default.to_value());
            }
            if let Some((min, max)) = prop.range {
                entry.insert("minimum".into(), json!(min));
                entry.insert("maximum".into(), json!(max));
            }
            entry.insert("description".into(), Value::String(prop.description.into()));
            props.insert(prop.name.to_string(), Value::Object(entry));
        }
        json!({
            "kind": self.kind,
            "type": "object",
            "properties": props,
            "required": self.required().collect::<Vec<_>>(),
        })
    }
}

/// A single field a frame emits into the session data.
#[derive(Debug, Clone, Copy)]
pub struct DataField {
    pub name: &'static str,
    pub kind: PropertyType,
    pub default: DefaultValue,
    pub description: &'static str,
}

/// Declared shape of the data a frame kind emits.
#[derive(Debug, Clone, Copy)]
pub struct DataSchema {
    pub fields: &'static [DataField],
}

/// The slider frame emits a single numeric response.
pub const SLIDER_DATA_SCHEMA: DataSchema = DataSchema {
    fields: &[DataField {
        name: "sliderResponse",
        kind: PropertyType::Number,
        default: DefaultValue::Number(0.0),
        description: "Value registered on the slider.",
    }],
};

impl DataSchema {
    pub fn to_json(&self) -> Value {
        let mut props = Map::new();
        for field in self.fields {
            props.insert(
                field.name.to_string(),
                json!({
                    "type": field.kind.name(),
                    "default": field.default.to_value(),
                    "description": field.description,
                }),
            );
        }
        json!({ "type": "object", "properties": props })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(value: Value) -> Properties {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn valid() -> Properties {
        props(json!({
            "title": "Slider title",
            "labelLeft": "Left",
            "labelRight": "Right",
            "initialValue": 50,
            "feedback": false
        }))
    }

    #[test]
    fn valid_properties_pass() {
        let result = SLIDER_FRAME_SCHEMA.validate(&valid());
        assert!(result.is_valid, "issues: {:?}", result.issues);
    }

    #[test]
    fn missing_initial_value_fails() {
        let mut p = valid();
        p.remove("initialValue");
        let err = SLIDER_FRAME_SCHEMA.validate(&p).into_result().unwrap_err();
        assert!(err.is_missing("initialValue"));
    }

    #[test]
    fn feedback_value_is_optional() {
        let p = valid();
        assert!(!p.contains_key("feedbackValue"));
        assert!(SLIDER_FRAME_SCHEMA.validate(&p).is_valid);
    }

    #[test]
    fn wrong_type_fails() {
        let mut p = valid();
        p.insert("feedback".into(), json!("yes"));
        let result = SLIDER_FRAME_SCHEMA.validate(&p);
        assert!(!result.is_valid);
        assert_eq!(
            result.issues,
            vec![ConfigIssue::WrongType {
                name: "feedback".into(),
                expected: PropertyType::Boolean,
                found: "string",
            }]
        );
    }

    #[test]
    fn out_of_range_fails() {
        let mut p = valid();
        p.insert("initialValue".into(), json!(150));
        p.insert("feedbackValue".into(), json!(-5));
        let result = SLIDER_FRAME_SCHEMA.validate(&p);
        assert_eq!(result.issues.len(), 2);
        assert!(result
            .issues
            .iter()
            .all(|i| matches!(i, ConfigIssue::OutOfRange { .. })));
    }

    #[test]
    fn all_missing_fields_are_reported() {
        let result = SLIDER_FRAME_SCHEMA.validate(&Properties::new());
        assert_eq!(result.issues.len(), 5);
    }

    #[test]
    fn unknown_properties_are_ignored() {
        let mut p = valid();
        p.insert("kind".into(), json!("exp-slider"));
        p.insert("id".into(), json!("0-slider-frame"));
        assert!(SLIDER_FRAME_SCHEMA.validate(&p).is_valid);
    }

    #[test]
    fn defaults_fill_only_absent_optionals() {
        let filled = SLIDER_FRAME_SCHEMA.apply_defaults(&valid());
        assert_eq!(filled.get("feedbackValue"), Some(&json!(0.0)));

        let mut p = valid();
        p.insert("feedbackValue".into(), json!(75));
        let filled = SLIDER_FRAME_SCHEMA.apply_defaults(&p);
        assert_eq!(filled.get("feedbackValue"), Some(&json!(75)));
    }

    #[test]
    fn schema_json_lists_required_fields() {
        let schema = SLIDER_FRAME_SCHEMA.to_json();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec!["title", "labelLeft", "labelRight", "initialValue", "feedback"]
        );
        assert_eq!(schema["properties"]["feedbackValue"]["default"], json!(0.0));
    }

    #[test]
    fn data_schema_declares_slider_response() {
        let schema = SLIDER_DATA_SCHEMA.to_json();
        assert_eq!(schema["properties"]["sliderResponse"]["type"], "number");
        assert_eq!(schema["properties"]["sliderResponse"]["default"], json!(0.0));
    }
}
