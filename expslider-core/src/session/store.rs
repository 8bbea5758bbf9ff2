//! Session persistence — one pretty-printed JSON file per session.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::PriorResults;

/// Errors from reading or writing session records.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a session emitted, as handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub sequence: Vec<String>,
    pub exp_data: PriorResults,
}

impl SessionRecord {
    /// File name derived from the start time, e.g. `session_20240102_030405.json`.
    pub fn file_name(&self) -> String {
        format!("session_{}.json", self.started_at.format("%Y%m%d_%H%M%S"))
    }
}

/// Write the record into `dir`, creating it if needed. Returns the file path.
pub fn save(dir: &Path, record: &SessionRecord) -> Result<PathBuf, StoreError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(record.file_name());
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

pub fn load(path: &Path) -> Result<SessionRecord, StoreError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
