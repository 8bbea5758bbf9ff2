//! Slider frame view — title, end labels, track with handle glyphs, value.
//!
//! The track is one terminal row. `TrackGeometry` records where it was drawn
//! so mouse columns can be mapped back to values.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use expslider_core::control::Handle;
use expslider_core::{Bounds, Mode, SliderFrame};

use crate::theme;

const HANDLE_GLYPH: char = '●';
const FILLED: char = '━';
const EMPTY: char = '─';

/// Screen position of a rendered track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackGeometry {
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

impl TrackGeometry {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.y && column >= self.x && column < self.x.saturating_add(self.width)
    }

    /// Value under `column`; columns outside the track pin to the ends.
    pub fn value_at(&self, column: u16, bounds: Bounds) -> f64 {
        if self.width <= 1 {
            return bounds.min;
        }
        let last = self.width - 1;
        let offset = column.saturating_sub(self.x).min(last);
        bounds.at_fraction(f64::from(offset) / f64::from(last))
    }

    /// Column a value is drawn at.
    pub fn column_of(&self, value: f64, bounds: Bounds) -> u16 {
        if self.width <= 1 {
            return self.x;
        }
        let last = self.width - 1;
        let offset = (bounds.fraction(value) * f64::from(last)).round() as u16;
        self.x + offset.min(last)
    }
}

/// Track cells for the given handles, left to right.
///
/// The filled section runs up to the participant's handle in collect mode;
/// in feedback mode it runs up to the earlier answer as well, in the muted
/// track colour.
pub fn track_cells(
    geometry: TrackGeometry,
    bounds: Bounds,
    handles: &[Handle],
    interactive: bool,
) -> Vec<(char, Style)> {
    let width = usize::from(geometry.width);
    let fill_to = handles
        .first()
        .map(|h| usize::from(geometry.column_of(h.value, bounds) - geometry.x));

    let mut cells: Vec<(char, Style)> = (0..width)
        .map(|i| match fill_to {
            Some(end) if i <= end => (FILLED, theme::track(interactive)),
            _ => (EMPTY, theme::muted()),
        })
        .collect();

    // Later handles draw over earlier ones when they share a column.
    for handle in handles {
        let col = usize::from(geometry.column_of(handle.value, bounds) - geometry.x);
        if let Some(cell) = cells.get_mut(col) {
            *cell = (HANDLE_GLYPH, theme::handle(handle.style));
        }
    }
    cells
}

/// Render the frame into `area`. Returns where the track was drawn.
pub fn render(f: &mut Frame, area: Rect, slider: &SliderFrame) -> Option<TrackGeometry> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // spacer
            Constraint::Length(1), // title
            Constraint::Length(1), // spacer
            Constraint::Length(1), // labels
            Constraint::Length(1), // track
            Constraint::Length(1), // value
            Constraint::Min(0),
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(slider.title(), theme::accent_bold()))
        .alignment(Alignment::Center);
    f.render_widget(title, rows[1]);

    // Leave a margin so the handle glyph at either end stays visible.
    let track_row = rows[4];
    let margin = 2.min(track_row.width / 4);
    let geometry = TrackGeometry {
        x: track_row.x + margin,
        y: track_row.y,
        width: track_row.width.saturating_sub(margin * 2),
    };
    if geometry.width == 0 {
        return None;
    }

    let label_area = Rect {
        x: geometry.x,
        width: geometry.width,
        ..rows[3]
    };
    f.render_widget(
        Paragraph::new(Span::styled(slider.label_left(), theme::text())),
        label_area,
    );
    f.render_widget(
        Paragraph::new(Span::styled(slider.label_right(), theme::text()))
            .alignment(Alignment::Right),
        label_area,
    );

    let bounds = slider.widget().bounds();
    let cells = track_cells(geometry, bounds, slider.handles(), slider.is_interactive());
    let spans: Vec<Span> = cells
        .into_iter()
        .map(|(ch, style)| Span::styled(ch.to_string(), style))
        .collect();
    let track_area = Rect {
        x: geometry.x,
        width: geometry.width,
        ..track_row
    };
    f.render_widget(Paragraph::new(Line::from(spans)), track_area);

    f.render_widget(
        Paragraph::new(value_line(slider)).alignment(Alignment::Center),
        rows[5],
    );

    Some(geometry)
}

fn value_line(slider: &SliderFrame) -> Line<'static> {
    let handles = slider.handles();
    match (slider.mode(), handles) {
        (Some(Mode::Feedback), [answer, reference, ..]) => Line::from(vec![
            Span::styled("Your answer: ", theme::muted()),
            Span::styled(format!("{:.0}", answer.value), theme::handle(answer.style)),
            Span::styled("   Reference: ", theme::muted()),
            Span::styled(
                format!("{:.0}", reference.value),
                theme::handle(reference.style),
            ),
        ]),
        (_, [handle, ..]) => Line::from(vec![
            Span::styled("Value: ", theme::muted()),
            Span::styled(format!("{:.0}", handle.value), theme::handle(handle.style)),
        ]),
        _ => Line::from(""),
    }
}
