//! Response record and the data payload a slider frame emits.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::control::{ChangeListener, HandleChange};
use crate::lifecycle::Properties;

/// The single mutable value a slider frame exposes to its host.
///
/// `None` until the frame mounts. Clones share the same cell, which is how the
/// widget's change listener writes into the frame's record. Each frame instance
/// creates its own record, so nothing is shared across instances.
#[derive(Debug, Clone, Default)]
pub struct ResponseRecord {
    value: Rc<Cell<Option<f64>>>,
}

impl ResponseRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<f64> {
        self.value.get()
    }

    pub fn set(&self, value: f64) {
        self.value.set(Some(value));
    }

    /// A change listener that mirrors every handle movement into this record.
    pub fn listener(&self) -> ChangeListener {
        let cell = Rc::clone(&self.value);
        Box::new(move |change: HandleChange| cell.set(Some(change.value)))
    }
}

/// Data emitted by a slider frame at completion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderData {
    #[serde(default)]
    pub slider_response: f64,
}

impl SliderData {
    /// Snapshot of a record; a record that was never set emits 0.
    pub fn from_record(record: &ResponseRecord) -> Self {
        Self {
            slider_response: record.value().unwrap_or_default(),
        }
    }

    pub fn to_properties(self) -> Properties {
        let mut p = Properties::new();
        p.insert(
            "sliderResponse".into(),
            serde_json::Number::from_f64(self.slider_response)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        );
        p
    }
}
