//! Overlay widgets — key help and the end-of-session summary.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

const KEYS: &[(&str, &str)] = &[
    ("h / ←", "move one step left"),
    ("l / →", "move one step right"),
    ("H / L", "move ten steps"),
    ("Home / End", "jump to either end"),
    ("mouse", "click or drag on the track"),
    ("Enter", "record and go to the next frame"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys ")
        .title_style(theme::accent_bold());

    let mut lines = vec![Line::from("")];
    for (key, action) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:>12}  "), theme::accent()),
            Span::styled(*action, theme::muted()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Feedback frames only display values; drags are ignored.",
        theme::neutral(),
    )));
    lines.push(Line::from(Span::styled(
        "  Press any key to dismiss...",
        theme::neutral(),
    )));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

/// Responses recorded this session, and where they were saved.
pub fn render_summary(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::positive())
        .title(" Session complete [Enter/q]quit ")
        .title_style(theme::positive());

    let mut lines = vec![Line::from("")];
    for id in &app.session.experiment().sequence {
        let value = app
            .session
            .exp_data()
            .slider_response(id)
            .map_or_else(|| "-".to_string(), |v| format!("{v:.0}"));
        lines.push(Line::from(vec![
            Span::styled(format!("  {id:>20}: "), theme::muted()),
            Span::styled(value, theme::accent()),
        ]));
    }
    lines.push(Line::from(""));
    match &app.saved_record {
        Some(path) => lines.push(Line::from(vec![
            Span::styled("  Saved to ", theme::muted()),
            Span::styled(path.display().to_string(), theme::positive()),
        ])),
        None => lines.push(Line::from(Span::styled(
            "  Session record was not saved.",
            theme::negative(),
        ))),
    }

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}
