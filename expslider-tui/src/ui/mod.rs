//! Top-level UI layout — header, frame panel, status bar, overlays.

pub mod overlays;
pub mod slider_view;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Draw the entire UI. Records the track geometry on `app` for mouse input.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    // Split: 1-line header + main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    app.track = draw_frame(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    match app.overlay {
        Overlay::Help => overlays::render_help(f, chunks[1]),
        Overlay::Summary => overlays::render_summary(f, chunks[1], app),
        Overlay::None => {}
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let (started, total) = app.session.progress();
    let mut spans = vec![
        Span::styled(format!(" {} ", app.experiment_name), theme::accent_bold()),
        Span::styled(format!(" frame {started}/{total}"), theme::muted()),
    ];
    if let Some(slider) = app.active_slider() {
        if let Some(mode) = slider.mode() {
            spans.push(Span::styled("  mode: ", theme::muted()));
            spans.push(Span::styled(mode.label(), theme::neutral()));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the active frame with its border.
fn draw_frame(f: &mut Frame, area: Rect, app: &AppState) -> Option<slider_view::TrackGeometry> {
    let title = match app.active_id() {
        Some(id) => format!(" {id} "),
        None => " done ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(app.active_slider().is_some()))
        .title(title)
        .title_style(theme::panel_title(app.active_slider().is_some()));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.active_slider() {
        Some(slider) => slider_view::render(f, inner, slider),
        None => {
            let text = if app.session.is_finished() {
                "All frames complete."
            } else {
                "No frame is running."
            };
            f.render_widget(Paragraph::new(Span::styled(text, theme::muted())), inner);
            None
        }
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
