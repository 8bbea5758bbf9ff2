//! Prior session data and response providers.
//!
//! A response provider computes a frame's configuration from the data of frames
//! that already completed, e.g. showing a participant their earlier answer in a
//! feedback frame. The host invokes it before constructing the frame, so the
//! frame itself never inspects session data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SliderConfiguration;
use crate::lifecycle::Properties;

/// Emitted data of every completed frame, keyed by frame id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorResults {
    frames: BTreeMap<String, Properties>,
}

impl PriorResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, frame_id: impl Into<String>, data: Properties) {
        self.frames.insert(frame_id.into(), data);
    }

    pub fn get(&self, frame_id: &str) -> Option<&Properties> {
        self.frames.get(frame_id)
    }

    /// The `sliderResponse` a frame emitted, if it completed with one.
    pub fn slider_response(&self, frame_id: &str) -> Option<f64> {
        self.frames
            .get(frame_id)?
            .get("sliderResponse")?
            .as_f64()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Computes a slider configuration from prior results.
pub type ResponseProvider = Box<dyn Fn(&PriorResults) -> SliderConfiguration>;

/// Provider that starts from `base` and takes `initialValue` from the response
/// of `source_frame`. Falls back to the base value if that frame has no response.
pub fn carry_forward(
    source_frame: impl Into<String>,
    base: SliderConfiguration,
) -> ResponseProvider {
    let source_frame = source_frame.into();
    Box::new(move |prior: &PriorResults| {
        let mut config = base.clone();
        if let Some(response) = prior.slider_response(&source_frame) {
            config.initial_value = response;
        }
        config
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn data(value: f64) -> Properties {
        json!({ "sliderResponse": value }).as_object().cloned().unwrap()
    }

    #[test]
    fn slider_response_lookup() {
        let mut prior = PriorResults::new();
        prior.insert("0-slider-frame", data(73.0));
        assert_eq!(prior.slider_response("0-slider-frame"), Some(73.0));
        assert_eq!(prior.slider_response("missing"), None);
        assert_eq!(prior.len(), 1);
    }

    #[test]
    fn carry_forward_uses_prior_response() {
        let base = SliderConfiguration::feedback("T", "L", "R", 50.0, 75.0);
        let provider = carry_forward("collect", base);

        let mut prior = PriorResults::new();
        assert_eq!(provider(&prior).initial_value, 50.0);

        prior.insert("collect", data(61.0));
        let config = provider(&prior);
        assert_eq!(config.initial_value, 61.0);
        assert_eq!(config.feedback_value, 75.0);
        assert!(config.feedback);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut prior = PriorResults::new();
        prior.insert("a", data(1.0));
        let json = serde_json::to_value(&prior).unwrap();
        assert_eq!(json, json!({ "a": { "sliderResponse": 1.0 } }));
    }
}
