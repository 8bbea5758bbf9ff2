//! Session host — runs an experiment's frames in sequence.
//!
//! For each frame the session:
//! 1. Resolves its properties (static definition, then carried values, then any
//!    registered response provider)
//! 2. Validates them against the frame kind's schema; an invalid frame is never
//!    mounted
//! 3. Mounts the frame and hands it to the caller for input
//! 4. On completion reads the frame's data once, records it, and unmounts

pub mod experiment;
pub mod store;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::frame::SliderFrame;
use crate::lifecycle::{FrameError, FrameLifecycle, Properties};
use crate::provider::{PriorResults, ResponseProvider};
use crate::schema::ConfigError;

pub use experiment::{Experiment, FrameDefinition};
pub use store::SessionRecord;

/// Errors from loading or running an experiment session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read experiment: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid experiment JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid experiment TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("sequence references unknown frame '{0}'")]
    UnknownFrame(String),

    #[error("frame '{frame}' has unknown kind '{kind}'")]
    UnknownKind { frame: String, kind: String },

    #[error("frame '{frame}' carries its initial value from '{source_frame}', which runs later")]
    CarryOrder { frame: String, source_frame: String },

    #[error("frame '{frame}' needs the response of '{source_frame}', which has none")]
    MissingPriorResult { frame: String, source_frame: String },

    #[error("frame '{frame}': {source}")]
    InvalidConfig { frame: String, source: ConfigError },

    #[error("frame '{frame}' failed to mount: {source}")]
    Mount { frame: String, source: FrameError },

    #[error("frame '{0}' is still active")]
    FrameStillActive(String),

    #[error("no frame is active")]
    NoActiveFrame,
}

/// Constructor for a fresh, unmounted frame of one kind.
pub type FrameConstructor = fn() -> Box<dyn FrameLifecycle>;

/// Maps frame kinds to constructors.
pub struct FrameRegistry {
    constructors: BTreeMap<String, FrameConstructor>,
}

impl Default for FrameRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(SliderFrame::KIND, SliderFrame::boxed);
        registry
    }
}

impl FrameRegistry {
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, kind: impl Into<String>, constructor: FrameConstructor) {
        self.constructors.insert(kind.into(), constructor);
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn build(&self, kind: &str) -> Option<Box<dyn FrameLifecycle>> {
        self.constructors.get(kind).map(|ctor| ctor())
    }
}

/// The frame currently mounted by the session.
pub struct ActiveFrame {
    pub id: String,
    pub frame: Box<dyn FrameLifecycle>,
}

impl ActiveFrame {
    /// The frame as a slider, when it is one.
    pub fn slider(&self) -> Option<&SliderFrame> {
        self.frame.as_any().downcast_ref()
    }

    pub fn slider_mut(&mut self) -> Option<&mut SliderFrame> {
        self.frame.as_any_mut().downcast_mut()
    }
}

pub struct Session {
    experiment: Experiment,
    registry: FrameRegistry,
    providers: HashMap<String, ResponseProvider>,
    exp_data: PriorResults,
    position: usize,
    active: Option<ActiveFrame>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(experiment: Experiment) -> Result<Self, SessionError> {
        Self::with_registry(experiment, FrameRegistry::default())
    }

    /// Create a session, checking the sequence and every frame kind up front.
    pub fn with_registry(
        experiment: Experiment,
        registry: FrameRegistry,
    ) -> Result<Self, SessionError> {
        experiment.check()?;
        for id in &experiment.sequence {
            let def = &experiment.frames[id];
            if registry.build(&def.kind).is_none() {
                return Err(SessionError::UnknownKind {
                    frame: id.clone(),
                    kind: def.kind.clone(),
                });
            }
        }
        Ok(Self {
            experiment,
            registry,
            providers: HashMap::new(),
            exp_data: PriorResults::new(),
            position: 0,
            active: None,
            started_at: Utc::now(),
            finished_at: None,
        })
    }

    /// Compute a frame's configuration from prior results instead of its
    /// static definition.
    pub fn set_provider(&mut self, frame_id: impl Into<String>, provider: ResponseProvider) {
        self.providers.insert(frame_id.into(), provider);
    }

    pub fn experiment(&self) -> &Experiment {
        &self.experiment
    }

    pub fn exp_data(&self) -> &PriorResults {
        &self.exp_data
    }

    pub fn active(&self) -> Option<&ActiveFrame> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveFrame> {
        self.active.as_mut()
    }

    /// (frames started, total frames).
    pub fn progress(&self) -> (usize, usize) {
        (self.position, self.experiment.sequence.len())
    }

    pub fn is_finished(&self) -> bool {
        self.active.is_none() && self.position >= self.experiment.sequence.len()
    }

    /// Properties the frame will be mounted with, given the results so far.
    pub fn resolve_properties(&self, frame_id: &str) -> Result<Properties, SessionError> {
        let def = self
            .experiment
            .frames
            .get(frame_id)
            .ok_or_else(|| SessionError::UnknownFrame(frame_id.to_string()))?;

        if let Some(provider) = self.providers.get(frame_id) {
            return Ok(provider(&self.exp_data).to_properties());
        }

        let mut properties = def.properties.clone();
        if let Some(source) = &def.initial_value_from {
            let value = self
                .exp_data
                .get(source)
                .and_then(|data| data.get("sliderResponse"))
                .ok_or_else(|| SessionError::MissingPriorResult {
                    frame: frame_id.to_string(),
                    source_frame: source.clone(),
                })?;
            properties.insert("initialValue".into(), value.clone());
        }
        Ok(properties)
    }

    /// Mount the next frame in the sequence.
    ///
    /// Returns `Ok(None)` once every frame has run. Configuration errors are
    /// reported before the frame is mounted and leave the session where it was.
    pub fn advance(&mut self) -> Result<Option<&mut ActiveFrame>, SessionError> {
        if let Some(active) = &self.active {
            return Err(SessionError::FrameStillActive(active.id.clone()));
        }
        let Some(id) = self.experiment.sequence.get(self.position).cloned() else {
            return Ok(None);
        };

        let kind = self.experiment.frames[&id].kind.clone();
        let mut frame = self
            .registry
            .build(&kind)
            .ok_or_else(|| SessionError::UnknownKind {
                frame: id.clone(),
                kind: kind.clone(),
            })?;

        let properties = self.resolve_properties(&id)?;
        if let Err(err) = frame.schema().validate(&properties).into_result() {
            warn!(frame = %id, error = %err, "frame configuration rejected");
            return Err(SessionError::InvalidConfig {
                frame: id,
                source: err,
            });
        }

        frame.mount(&properties).map_err(|source| SessionError::Mount {
            frame: id.clone(),
            source,
        })?;

        info!(frame = %id, kind = %kind, position = self.position, "frame started");
        self.position += 1;
        Ok(Some(self.active.insert(ActiveFrame { id, frame })))
    }

    /// Finish the active frame: read its data once, record it, unmount it.
    pub fn complete_active(&mut self) -> Result<Properties, SessionError> {
        let mut active = self.active.take().ok_or(SessionError::NoActiveFrame)?;
        let data = active.frame.data();
        active.frame.unmount();

        info!(
            frame = %active.id,
            data = %serde_json::Value::Object(data.clone()),
            "frame completed"
        );
        self.exp_data.insert(active.id, data.clone());
        if self.position >= self.experiment.sequence.len() {
            self.finished_at = Some(Utc::now());
        }
        Ok(data)
    }

    /// Snapshot of the session for persistence.
    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            started_at: self.started_at,
            finished_at: self.finished_at,
            sequence: self.experiment.sequence.clone(),
            exp_data: self.exp_data.clone(),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.frame.unmount();
        }
    }
}
