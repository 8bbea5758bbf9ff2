//! Input dispatch — overlays first, then global keys, then the slider.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{AppState, Overlay};

/// Keyboard step sizes, in widget steps.
const SMALL_STEP: f64 = 1.0;
const LARGE_STEP: f64 = 10.0;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Summary => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
                app.running = false;
            }
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.toggle_help();
            return;
        }
        _ => {}
    }

    // 3. Slider keys.
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.nudge(-SMALL_STEP),
        KeyCode::Char('l') | KeyCode::Right => app.nudge(SMALL_STEP),
        KeyCode::Char('H') => app.nudge(-LARGE_STEP),
        KeyCode::Char('L') => app.nudge(LARGE_STEP),
        KeyCode::Home => app.jump_to(f64::NEG_INFINITY),
        KeyCode::End => app.jump_to(f64::INFINITY),
        KeyCode::Enter => app.complete_frame(),
        _ => {}
    }
}

/// Handle a mouse event: press on the track grabs the handle, dragging moves
/// it, release lets go.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if app.overlay != Overlay::None {
        return;
    }
    let Some(track) = app.track else {
        return;
    };
    let bounds = match app.active_slider() {
        Some(slider) => slider.widget().bounds(),
        None => return,
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if track.contains(mouse.column, mouse.row) {
                app.drag_handle = Some(0);
                app.drag_to(0, track.value_at(mouse.column, bounds));
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(handle) = app.drag_handle {
                app.drag_to(handle, track.value_at(mouse.column, bounds));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => app.drag_handle = None,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, KeyModifiers};

    use expslider_core::Session;

    use super::*;
    use crate::app::StatusLevel;
    use crate::demo;
    use crate::ui::slider_view::TrackGeometry;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app(dir: &std::path::Path) -> AppState {
        let session = Session::new(demo::experiment()).unwrap();
        let mut app = AppState::new(session, demo::NAME, None, dir.to_path_buf());
        app.advance();
        // 101 columns starting at x=10: one column per value.
        app.track = Some(TrackGeometry {
            x: 10,
            y: 5,
            width: 101,
        });
        app
    }

    fn response(app: &AppState) -> Option<f64> {
        app.active_slider().and_then(|s| s.response())
    }

    #[test]
    fn arrow_and_vim_keys_move_the_handle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        handle_key(&mut app, press(KeyCode::Right));
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(response(&app), Some(52.0));
        handle_key(&mut app, press(KeyCode::Char('H')));
        assert_eq!(response(&app), Some(42.0));
        handle_key(&mut app, press(KeyCode::Home));
        assert_eq!(response(&app), Some(0.0));
        handle_key(&mut app, press(KeyCode::End));
        assert_eq!(response(&app), Some(100.0));
    }

    #[test]
    fn release_events_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let mut key = press(KeyCode::Right);
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert_eq!(response(&app), Some(50.0));
    }

    #[test]
    fn help_overlay_swallows_the_next_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert_eq!(app.overlay, Overlay::Help);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn quit_key_stops_the_app() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn mouse_press_and_drag_follow_the_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 30, 5));
        assert_eq!(response(&app), Some(20.0));
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 85, 9));
        assert_eq!(response(&app), Some(75.0));
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 500, 9));
        assert_eq!(response(&app), Some(100.0));

        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 85, 5));
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 10, 5));
        assert_eq!(response(&app), Some(100.0));
    }

    #[test]
    fn clicks_off_the_track_do_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 30, 6));
        assert_eq!(response(&app), Some(50.0));
        assert!(app.drag_handle.is_none());
    }

    #[test]
    fn enter_runs_the_experiment_to_the_summary() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        handle_key(&mut app, press(KeyCode::Enter));
        handle_key(&mut app, press(KeyCode::Left));
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Warning);
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.overlay, Overlay::Summary);

        handle_key(&mut app, press(KeyCode::Enter));
        assert!(!app.running);
    }
}
