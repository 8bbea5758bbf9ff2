//! Frame lifecycle — the capability every frame kind exposes to the session host.
//!
//! A frame moves through `Uninitialized → Mounted → Unmounted`, once, with no
//! way back. The host calls `mount(properties) → [input]* → data() → unmount()`
//! in that order exactly once per frame instance.

use std::any::Any;
use std::fmt;

use thiserror::Error;

use crate::control::ControlError;
use crate::schema::{ConfigError, DataSchema, FrameSchema};

/// Frame properties and emitted data both travel as JSON objects.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Lifecycle state of a frame instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Mounted,
    Unmounted,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Mounted => "mounted",
            LifecycleState::Unmounted => "unmounted",
        })
    }
}

/// Errors that abort a frame mount. Both are fatal to the frame instance.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("slider control failed to initialize: {0}")]
    Control(#[from] ControlError),

    #[error("cannot mount a frame that is {0}")]
    AlreadyMounted(LifecycleState),
}

/// Capability interface the host drives polymorphically across frame kinds.
pub trait FrameLifecycle {
    /// Kind name used in experiment definitions (e.g. `exp-slider`).
    fn kind(&self) -> &'static str;

    /// Configuration schema the host validates properties against before mounting.
    fn schema(&self) -> &'static FrameSchema;

    /// Shape of the data returned by `data()`.
    fn data_schema(&self) -> &'static DataSchema;

    fn state(&self) -> LifecycleState;

    /// Mount from a property map. Must fail fast on an invalid configuration.
    fn mount(&mut self, properties: &Properties) -> Result<(), FrameError>;

    /// Release every input listener. Idempotent.
    fn unmount(&mut self);

    /// Data record for the session, read once at frame completion.
    fn data(&self) -> Properties;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
