//! Copper Line palette and semantic styling for the portal.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const COPPER: Color = Color::Rgb(222, 135, 80); // #de8750
pub const SIGNAL_TEAL: Color = Color::Rgb(104, 216, 196); // #68d8c4
pub const LINE_BLUE: Color = Color::Rgb(120, 170, 255); // #78aaff
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 220, 130); // #78dc82
pub const ERROR_RED: Color = Color::Rgb(240, 104, 104); // #f06868
pub const WARN_AMBER: Color = Color::Rgb(235, 200, 110); // #ebc86e

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(200, 202, 210); // #c8cad2
pub const MUTED_GRAY: Color = Color::Rgb(120, 126, 140); // #787e8c
pub const BORDER_GRAY: Color = Color::Rgb(88, 96, 112); // #586070
pub const BG_HIGHLIGHT: Color = Color::Rgb(44, 47, 56); // #2c2f38
pub const BG_DARK: Color = Color::Rgb(26, 28, 34); // #1a1c22

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default()
        .fg(SIGNAL_TEAL)
        .add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(COPPER)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Form field label column.
pub fn label_style() -> Style {
    Style::default().fg(MUTED_GRAY)
}

/// Form field value text.
pub fn value_style() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// The field that currently holds input focus.
pub fn field_focused() -> Style {
    Style::default()
        .fg(COPPER)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Inline validation error text.
pub fn error_style() -> Style {
    Style::default().fg(ERROR_RED)
}

/// Success notices.
pub fn success_style() -> Style {
    Style::default().fg(SUCCESS_GREEN)
}

/// Footer key hints.
pub fn hint_style() -> Style {
    Style::default().fg(MUTED_GRAY)
}

/// Immutable fields shown in the edit form (`circuit_id`).
pub fn locked_style() -> Style {
    Style::default()
        .fg(MUTED_GRAY)
        .add_modifier(Modifier::DIM)
}
