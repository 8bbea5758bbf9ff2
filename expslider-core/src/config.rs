//! Slider frame configuration — the six properties one frame instance is built from.

use serde::{Deserialize, Serialize};

use crate::lifecycle::Properties;
use crate::schema::{ConfigError, ConfigIssue, SLIDER_FRAME_SCHEMA};

/// Lower bound of every slider value.
pub const RESPONSE_MIN: f64 = 0.0;
/// Upper bound of every slider value.
pub const RESPONSE_MAX: f64 = 100.0;

/// Immutable input parameters for one slider frame instance.
///
/// Field names serialize in camelCase, matching the experiment file format
/// (`labelLeft`, `initialValue`, `feedbackValue`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderConfiguration {
    pub title: String,
    pub label_left: String,
    pub label_right: String,
    pub initial_value: f64,
    pub feedback: bool,
    /// Reference value shown by the second handle. Only meaningful in feedback mode.
    #[serde(default)]
    pub feedback_value: f64,
}

impl SliderConfiguration {
    /// Configuration for a frame that collects a response.
    pub fn collect(
        title: impl Into<String>,
        label_left: impl Into<String>,
        label_right: impl Into<String>,
        initial_value: f64,
    ) -> Self {
        Self {
            title: title.into(),
            label_left: label_left.into(),
            label_right: label_right.into(),
            initial_value,
            feedback: false,
            feedback_value: 0.0,
        }
    }

    /// Configuration for a frame that shows a prior response next to a reference value.
    pub fn feedback(
        title: impl Into<String>,
        label_left: impl Into<String>,
        label_right: impl Into<String>,
        initial_value: f64,
        feedback_value: f64,
    ) -> Self {
        Self {
            title: title.into(),
            label_left: label_left.into(),
            label_right: label_right.into(),
            initial_value,
            feedback: true,
            feedback_value,
        }
    }

    /// Parse a frame's property map, validating it against the slider schema first.
    ///
    /// Every schema violation is reported at once. Absent optional properties
    /// take their schema defaults.
    pub fn from_properties(properties: &Properties) -> Result<Self, ConfigError> {
        SLIDER_FRAME_SCHEMA.validate(properties).into_result()?;
        let filled = SLIDER_FRAME_SCHEMA.apply_defaults(properties);
        serde_json::from_value(serde_json::Value::Object(filled)).map_err(|e| ConfigError {
            issues: vec![ConfigIssue::Malformed(e.to_string())],
        })
    }

    /// Property map form, as stored in experiment definitions.
    pub fn to_properties(&self) -> Properties {
        let mut p = Properties::new();
        p.insert("title".into(), self.title.clone().into());
        p.insert("labelLeft".into(), self.label_left.clone().into());
        p.insert("labelRight".into(), self.label_right.clone().into());
        p.insert("initialValue".into(), number(self.initial_value));
        p.insert("feedback".into(), self.feedback.into());
        p.insert("feedbackValue".into(), number(self.feedback_value));
        p
    }

    /// Operating mode implied by the `feedback` flag.
    pub fn mode(&self) -> Mode {
        if self.feedback {
            Mode::Feedback
        } else {
            Mode::Collect
        }
    }

    /// Range-check the numeric fields. NaN and infinities fail as out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();
        for (name, value) in [
            ("initialValue", self.initial_value),
            ("feedbackValue", self.feedback_value),
        ] {
            if !(RESPONSE_MIN..=RESPONSE_MAX).contains(&value) {
                issues.push(ConfigIssue::OutOfRange {
                    name: name.to_string(),
                    value,
                    min: RESPONSE_MIN,
                    max: RESPONSE_MAX,
                });
            }
        }
        ConfigError::from_issues(issues)
    }
}

/// Non-finite numbers have no JSON form; they become `null` and fail validation.
fn number(value: f64) -> serde_json::Value {
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Operating mode of a slider frame. Fixed for the lifetime of the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// One interactive handle; the participant registers a value.
    Collect,
    /// Two fixed handles: the prior response and the reference value.
    Feedback,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Collect => "Collect",
            Mode::Feedback => "Feedback",
        }
    }

    pub fn is_interactive(self) -> bool {
        matches!(self, Mode::Collect)
    }
}
