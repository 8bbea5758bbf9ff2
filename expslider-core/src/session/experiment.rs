//! Experiment definitions — the frames of a study and the order they run in.
//!
//! ```json
//! {
//!     "frames": {
//!         "slider-frame": {
//!             "kind": "exp-slider",
//!             "title": "Slider title",
//!             "labelLeft": "Left",
//!             "labelRight": "Right",
//!             "initialValue": 50,
//!             "feedback": false
//!         },
//!         "slider-feedback": {
//!             "kind": "exp-slider",
//!             "title": "Slider title",
//!             "labelLeft": "Left",
//!             "labelRight": "Right",
//!             "feedback": true,
//!             "feedbackValue": 75,
//!             "initialValueFrom": "slider-frame"
//!         }
//!     },
//!     "sequence": ["slider-frame", "slider-feedback"]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lifecycle::Properties;

use super::SessionError;

/// One frame of an experiment: its kind plus the properties handed to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDefinition {
    pub kind: String,

    /// Take `initialValue` from the `sliderResponse` of this earlier frame.
    #[serde(
        rename = "initialValueFrom",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_value_from: Option<String>,

    #[serde(flatten)]
    pub properties: Properties,
}

impl FrameDefinition {
    pub fn new(kind: impl Into<String>, properties: Properties) -> Self {
        Self {
            kind: kind.into(),
            initial_value_from: None,
            properties,
        }
    }

    pub fn carrying_from(mut self, frame_id: impl Into<String>) -> Self {
        self.initial_value_from = Some(frame_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub frames: BTreeMap<String, FrameDefinition>,
    pub sequence: Vec<String>,
}

impl Experiment {
    pub fn from_json(text: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_toml(text: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from disk; `.toml` files are parsed as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&text),
            _ => Self::from_json(&text),
        }
    }

    /// Every id in the sequence names a defined frame, and every carried value
    /// comes from a frame that runs earlier in the sequence.
    pub fn check(&self) -> Result<(), SessionError> {
        for (pos, id) in self.sequence.iter().enumerate() {
            let def = self
                .frames
                .get(id)
                .ok_or_else(|| SessionError::UnknownFrame(id.clone()))?;
            if let Some(source) = &def.initial_value_from {
                if !self.sequence[..pos].contains(source) {
                    return Err(SessionError::CarryOrder {
                        frame: id.clone(),
                        source_frame: source.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
