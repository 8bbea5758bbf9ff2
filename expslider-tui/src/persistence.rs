//! TUI state persistence — JSON save/load across restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app::AppState;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// Experiment file to reopen when started without an argument.
    pub last_experiment: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState. The demo never replaces a
/// remembered experiment.
pub fn extract(app: &AppState, previous: &PersistedState) -> PersistedState {
    PersistedState {
        last_experiment: app
            .experiment_path
            .clone()
            .or_else(|| previous.last_experiment.clone()),
        output_dir: Some(app.output_dir.clone()),
    }
}
