//! Application state — single-owner, main-thread only.
//!
//! Owns the running `Session`. Input handlers call the methods here; the
//! renderer reads from it and writes back the last drawn track geometry so
//! mouse positions can be mapped to values.

use std::path::PathBuf;

use tracing::{error, info};

use expslider_core::control::RejectReason;
use expslider_core::session::{store, ActiveFrame};
use expslider_core::{DragOutcome, Session, SliderFrame};

use crate::ui::slider_view::TrackGeometry;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Summary,
}

/// Top-level application state.
pub struct AppState {
    pub session: Session,
    pub experiment_name: String,
    /// Where the experiment was loaded from; `None` for the built-in demo.
    pub experiment_path: Option<PathBuf>,
    pub running: bool,
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,

    // Output
    pub output_dir: PathBuf,
    pub saved_record: Option<PathBuf>,

    // Mouse
    pub track: Option<TrackGeometry>,
    pub drag_handle: Option<usize>,
}

impl AppState {
    pub fn new(
        session: Session,
        experiment_name: impl Into<String>,
        experiment_path: Option<PathBuf>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            session,
            experiment_name: experiment_name.into(),
            experiment_path,
            running: true,
            overlay: Overlay::None,
            status_message: None,
            output_dir,
            saved_record: None,
            track: None,
            drag_handle: None,
        }
    }

    /// The mounted slider frame, if the active frame is one.
    pub fn active_slider(&self) -> Option<&SliderFrame> {
        self.session.active().and_then(ActiveFrame::slider)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.session.active().map(|a| a.id.as_str())
    }

    /// Mount the next frame, or finish the session when none remain.
    ///
    /// A frame that cannot be mounted ends the run: the results so far are
    /// saved and the error stays on the status line under the summary.
    pub fn advance(&mut self) {
        let started = self
            .session
            .advance()
            .map(|active| active.map(|a| a.id.clone()));
        match started {
            Ok(Some(id)) => {
                let (pos, total) = self.session.progress();
                self.set_status(format!("Frame {pos}/{total}: {id}"));
            }
            Ok(None) => self.finish(),
            Err(err) => {
                let msg = err.to_string();
                self.finish();
                self.set_error(msg);
            }
        }
    }

    /// Drag one handle of the active slider to `value`.
    pub fn drag_to(&mut self, handle: usize, value: f64) {
        let Some(slider) = self.session.active_mut().and_then(ActiveFrame::slider_mut) else {
            return;
        };
        match slider.drag(handle, value) {
            DragOutcome::Moved(v) => self.set_status(format!("Response: {v:.0}")),
            DragOutcome::Unchanged(_) => {}
            DragOutcome::Rejected(RejectReason::Disabled) => {
                self.set_warning("This slider shows an earlier answer; press Enter to continue")
            }
            DragOutcome::Rejected(reason) => self.set_warning(format!("Input ignored: {reason:?}")),
        }
    }

    /// Move the participant's handle by `steps` widget steps.
    pub fn nudge(&mut self, steps: f64) {
        let Some(slider) = self.active_slider() else {
            return;
        };
        let Some(current) = slider.handles().first().map(|h| h.value) else {
            return;
        };
        let target = current + steps * slider.widget().step();
        self.drag_to(0, target);
    }

    /// Move the participant's handle straight to `value`.
    pub fn jump_to(&mut self, value: f64) {
        self.drag_to(0, value);
    }

    /// Record the active frame and move on.
    pub fn complete_frame(&mut self) {
        let id = self.active_id().map(str::to_string);
        match self.session.complete_active() {
            Ok(data) => {
                let response = data.get("sliderResponse").and_then(|v| v.as_f64());
                if let (Some(id), Some(response)) = (id, response) {
                    self.set_status(format!("Recorded {id}: {response:.0}"));
                }
                self.drag_handle = None;
                self.advance();
            }
            Err(err) => self.set_error(err.to_string()),
        }
    }

    /// Save the session record and show the summary.
    fn finish(&mut self) {
        let record = self.session.record();
        match store::save(&self.output_dir, &record) {
            Ok(path) => {
                info!(path = %path.display(), "session saved");
                self.set_status(format!("Session saved to {}", path.display()));
                self.saved_record = Some(path);
            }
            Err(err) => self.set_error(format!("Failed to save session: {err}")),
        }
        self.track = None;
        self.overlay = Overlay::Summary;
    }

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Overlay::Help => Overlay::None,
            _ => Overlay::Help,
        };
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Set an error status message and log it.
    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        error!(message = %msg, "tui error");
        self.status_message = Some((msg, StatusLevel::Error));
    }
}

#[cfg(test)]
mod tests {
    use expslider_core::Mode;

    use super::*;
    use crate::demo;

    fn demo_app(dir: &std::path::Path) -> AppState {
        let session = Session::new(demo::experiment()).unwrap();
        let mut app = AppState::new(session, demo::NAME, None, dir.to_path_buf());
        app.advance();
        app
    }

    #[test]
    fn starts_on_the_first_frame() {
        let dir = tempfile::tempdir().unwrap();
        let app = demo_app(dir.path());
        assert_eq!(app.active_id(), Some("slider-frame"));
        assert_eq!(app.active_slider().unwrap().mode(), Some(Mode::Collect));
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Info);
    }

    #[test]
    fn nudge_and_jump_move_the_handle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app(dir.path());
        app.nudge(1.0);
        assert_eq!(app.active_slider().unwrap().response(), Some(51.0));
        app.nudge(-10.0);
        assert_eq!(app.active_slider().unwrap().response(), Some(41.0));
        app.jump_to(100.0);
        assert_eq!(app.active_slider().unwrap().response(), Some(100.0));
        app.nudge(10.0);
        assert_eq!(app.active_slider().unwrap().response(), Some(100.0));
    }

    #[test]
    fn feedback_drags_leave_a_hint() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app(dir.path());
        app.jump_to(30.0);
        app.complete_frame();

        assert_eq!(app.active_id(), Some("slider-feedback"));
        app.nudge(1.0);
        assert_eq!(app.active_slider().unwrap().response(), Some(30.0));
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Warning);
    }

    #[test]
    fn last_frame_saves_and_shows_summary() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app(dir.path());
        app.jump_to(64.0);
        app.complete_frame();
        app.complete_frame();

        assert!(app.session.is_finished());
        assert_eq!(app.overlay, Overlay::Summary);
        let path = app.saved_record.clone().unwrap();
        let record = store::load(&path).unwrap();
        assert_eq!(record.exp_data.slider_response("slider-frame"), Some(64.0));
        assert_eq!(record.exp_data.slider_response("slider-feedback"), Some(64.0));
    }

    #[test]
    fn unmountable_frame_saves_partial_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut experiment = demo::experiment();
        experiment
            .frames
            .get_mut("slider-feedback")
            .unwrap()
            .properties
            .remove("title");
        let session = Session::new(experiment).unwrap();
        let mut app = AppState::new(session, demo::NAME, None, dir.path().to_path_buf());
        app.advance();
        app.jump_to(64.0);
        app.complete_frame();

        assert_eq!(app.overlay, Overlay::Summary);
        let (message, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Error);
        assert!(message.contains("slider-feedback"), "{message}");
        let record = store::load(&app.saved_record.clone().unwrap()).unwrap();
        assert_eq!(record.exp_data.slider_response("slider-frame"), Some(64.0));
        assert_eq!(record.exp_data.slider_response("slider-feedback"), None);
    }

    #[test]
    fn completing_after_the_end_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app(dir.path());
        app.complete_frame();
        app.complete_frame();
        app.complete_frame();
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Error);
    }

    #[test]
    fn help_toggles() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app(dir.path());
        app.toggle_help();
        assert_eq!(app.overlay, Overlay::Help);
        app.toggle_help();
        assert_eq!(app.overlay, Overlay::None);
    }
}
