//! Experiment slider frame — collects or displays a bounded 0–100 response.
//!
//! This crate contains the whole behavioral core of the frame:
//! - Configuration and its schema (required fields, types, ranges, defaults)
//! - Mode controller (Collect vs Feedback, resolved once at mount)
//! - Range control primitive and the slider widget built on it
//! - Response record and the emitted data payload
//! - `FrameLifecycle` capability trait and the slider frame implementing it
//! - A minimal frame-sequencing session host and session persistence

pub mod config;
pub mod control;
pub mod frame;
pub mod lifecycle;
pub mod mode;
pub mod provider;
pub mod response;
pub mod schema;
pub mod session;
pub mod widget;

pub use config::{Mode, SliderConfiguration};
pub use control::{Bounds, DragOutcome, HandleStyle, RangeControl};
pub use frame::SliderFrame;
pub use lifecycle::{FrameError, FrameLifecycle, LifecycleState, Properties};
pub use provider::{PriorResults, ResponseProvider};
pub use response::{ResponseRecord, SliderData};
pub use schema::{ConfigError, ConfigIssue, SchemaValidation};
pub use session::{Experiment, Session, SessionError};
pub use widget::SliderWidget;
