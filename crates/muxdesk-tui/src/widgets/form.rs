//! Labeled field-row rendering shared by the login, register, and edit
//! forms. Each row is a single line: label column, value, optional inline
//! error. Both circuit forms render through this, so focus, masking, and
//! error styling stay identical everywhere.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme;

/// Width of the label column, covering the longest label ("Client Name").
pub const LABEL_WIDTH: usize = 14;

/// One labeled form row.
pub struct FieldRow<'a> {
    pub label: &'a str,
    pub value: &'a str,
    /// Holds input focus: highlighted, with a block cursor after the value.
    pub focused: bool,
    /// Render the value as dots (password entry).
    pub masked: bool,
    /// Shown but not editable (`circuit_id` in the edit form).
    pub locked: bool,
    pub error: Option<&'a str>,
}

impl<'a> FieldRow<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
            masked: false,
            locked: false,
            error: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        let display = if self.masked && !self.value.is_empty() {
            "\u{25CF}".repeat(self.value.chars().count())
        } else {
            self.value.to_owned()
        };

        let value_style = if self.locked {
            theme::locked_style()
        } else if self.focused {
            theme::field_focused()
        } else {
            theme::value_style()
        };

        let mut spans = vec![
            Span::styled(
                format!(" {:<width$}", self.label, width = LABEL_WIDTH),
                theme::label_style(),
            ),
            Span::styled(display, value_style),
        ];

        if self.focused {
            spans.push(Span::styled("\u{2588}", theme::field_focused()));
        }

        if let Some(message) = self.error {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(message, theme::error_style()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
