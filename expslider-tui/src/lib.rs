//! Experiment slider TUI — runs an experiment's frames in the terminal.
//!
//! Layout:
//! 1. Header — experiment name, frame progress, current mode
//! 2. Frame — title, end labels, the slider track and its value
//! 3. Status bar — key hints and the last status message
//!
//! Help and the end-of-session summary are drawn as overlays.

pub mod app;
pub mod demo;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use theme::Theme;
