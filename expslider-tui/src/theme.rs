//! Parrot/neon theme tokens for the slider TUI.
//!
//! # Color Palette
//! - **Background**: deep charcoal
//! - **Accent**: electric cyan (focus, the participant's handle)
//! - **Highlight**: signal red (the reference handle in feedback mode)
//! - **Positive**: neon green (saved, completed)
//! - **Warning**: neon orange (ignored input)
//! - **Negative**: hot pink (errors)
//! - **Muted**: steel blue (hints, secondary text)

use ratatui::style::{Color, Modifier, Style};

use expslider_core::HandleStyle;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    /// Reference handle colour.
    pub highlight: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            highlight: Color::Rgb(255, 48, 48),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Colour of a slider handle glyph.
    pub fn handle_color(&self, style: HandleStyle) -> Color {
        match style {
            HandleStyle::Standard => self.accent,
            HandleStyle::Highlight => self.highlight,
        }
    }

    /// Filled part of the track: accent while the participant can drag,
    /// neutral when the slider only displays values.
    pub fn track_color(&self, interactive: bool) -> Color {
        if interactive {
            self.accent
        } else {
            self.neutral
        }
    }
}

// ── Style shortcuts used by the renderers ────────────────────────────

pub fn accent() -> Style {
    Style::default().fg(Theme::default().accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(Theme::default().positive)
}

pub fn negative() -> Style {
    Style::default().fg(Theme::default().negative)
}

pub fn warning() -> Style {
    Style::default().fg(Theme::default().warning)
}

pub fn neutral() -> Style {
    Style::default().fg(Theme::default().neutral)
}

pub fn muted() -> Style {
    Style::default().fg(Theme::default().muted)
}

pub fn text() -> Style {
    Style::default().fg(Theme::default().text_primary)
}

pub fn handle(style: HandleStyle) -> Style {
    Style::default()
        .fg(Theme::default().handle_color(style))
        .add_modifier(Modifier::BOLD)
}

pub fn track(interactive: bool) -> Style {
    Style::default().fg(Theme::default().track_color(interactive))
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}
