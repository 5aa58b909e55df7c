//! Record view with an inline edit mode.
//!
//! Viewing shows the found record read-only. `e` snapshots it into an
//! editable draft; `circuit_id` stays on screen but is never editable.
//! Enter re-validates the editable subset and saves through the portal,
//! refreshing `last_updated`. Esc discards the draft and clears errors,
//! leaving the original record untouched.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;

use muxdesk_core::{CircuitDraft, CircuitField, CircuitRecord, Portal};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::age_fmt;
use crate::widgets::form::FieldRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailsMode {
    Viewing,
    Editing,
}

pub struct DetailsScreen {
    portal: Portal,
    action_tx: Option<UnboundedSender<Action>>,
    focused: bool,
    mode: DetailsMode,
    record: Option<CircuitRecord>,
    draft: CircuitDraft,
    active_field: CircuitField,
    errors: muxdesk_core::FieldErrors,
    /// Save failure that is not tied to a single field.
    form_error: Option<String>,
    /// An update call is in flight; input is disabled until it reports back.
    pending: bool,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl DetailsScreen {
    pub fn new(portal: Portal) -> Self {
        Self {
            portal,
            action_tx: None,
            focused: false,
            mode: DetailsMode::Viewing,
            record: None,
            draft: CircuitDraft::default(),
            active_field: CircuitField::ClientName,
            errors: muxdesk_core::FieldErrors::default(),
            form_error: None,
            pending: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    /// Snapshot the record into a draft and start editing.
    fn enter_edit(&mut self) {
        let Some(record) = &self.record else {
            return;
        };
        self.draft = record.to_draft();
        self.active_field = CircuitField::ClientName;
        self.errors = muxdesk_core::FieldErrors::default();
        self.form_error = None;
        self.mode = DetailsMode::Editing;
    }

    /// Drop the draft and return to the untouched record.
    fn cancel_edit(&mut self) {
        self.draft = CircuitDraft::default();
        self.errors = muxdesk_core::FieldErrors::default();
        self.form_error = None;
        self.mode = DetailsMode::Viewing;
    }

    fn focus_next(&mut self) {
        let fields = &CircuitField::EDITABLE;
        let pos = fields
            .iter()
            .position(|&f| f == self.active_field)
            .unwrap_or(0);
        self.active_field = fields[(pos + 1) % fields.len()];
    }

    fn focus_prev(&mut self) {
        let fields = &CircuitField::EDITABLE;
        let pos = fields
            .iter()
            .position(|&f| f == self.active_field)
            .unwrap_or(0);
        self.active_field = fields[(pos + fields.len() - 1) % fields.len()];
    }

    /// Spawn the save call and report back through `Action::UpdateOutcome`.
    fn submit(&mut self) {
        if self.pending {
            return;
        }
        let Some(record) = &self.record else {
            return;
        };
        self.pending = true;
        self.form_error = None;

        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let portal = self.portal.clone();
        let circuit_id = record.circuit_id.clone();
        let draft = self.draft.clone();

        tokio::spawn(async move {
            let result = portal.update(&circuit_id, &draft).await.map(Box::new);
            let _ = tx.send(Action::UpdateOutcome(result));
        });
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect) -> Rect {
        let panel_w = 72u16.min(area.width.saturating_sub(4));
        let panel_h = 20u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(panel_w)) / 2;
        let y = (area.height.saturating_sub(panel_h)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, panel_w, panel_h);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            panel,
        );

        let title = match self.mode {
            DetailsMode::Viewing => "Circuit Details",
            DetailsMode::Editing => "Circuit Details \u{2014} Editing",
        };

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title, theme::title_style()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.mode == DetailsMode::Editing {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        inner
    }

    fn render_viewing(&self, frame: &mut Frame, inner: Rect, record: &CircuitRecord) {
        let mut constraints = vec![Constraint::Length(1)]; // spacer
        constraints.extend(std::iter::repeat_n(
            Constraint::Length(1),
            CircuitField::ALL.len() + 1, // field rows + last_updated
        ));
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1)); // hints
        let layout = Layout::vertical(constraints).split(inner);

        for (i, field) in CircuitField::ALL.iter().enumerate() {
            FieldRow::new(&field.display_name(), record.field(*field))
                .render(frame, layout[i + 1]);
        }

        let updated = format!(
            "{}  ({})",
            age_fmt::fmt_timestamp(record.last_updated),
            age_fmt::fmt_age(record.last_updated, chrono::Utc::now()),
        );
        FieldRow::new("Last Updated", &updated).render(frame, layout[CircuitField::ALL.len() + 1]);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "e edit  Esc back to search",
                theme::hint_style(),
            ))
            .alignment(Alignment::Center),
            layout[layout.len() - 1],
        );
    }

    fn render_editing(&self, frame: &mut Frame, inner: Rect, record: &CircuitRecord) {
        let mut constraints = vec![Constraint::Length(1)]; // spacer
        constraints.extend(std::iter::repeat_n(
            Constraint::Length(1),
            CircuitField::EDITABLE.len() + 1, // locked id + editable rows
        ));
        constraints.push(Constraint::Length(1)); // spacer
        constraints.push(Constraint::Length(1)); // pending / form error
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1)); // hints
        let layout = Layout::vertical(constraints).split(inner);

        FieldRow::new("Circuit Id", &record.circuit_id)
            .locked()
            .render(frame, layout[1]);

        for (i, field) in CircuitField::EDITABLE.iter().enumerate() {
            FieldRow::new(&field.display_name(), self.draft.field(*field))
                .focused(self.focused && !self.pending && self.active_field == *field)
                .error(self.errors.get(*field))
                .render(frame, layout[i + 2]);
        }

        let status_row = layout[CircuitField::EDITABLE.len() + 3];
        if self.pending {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Saving...")
                .style(theme::value_style())
                .throbber_style(Style::default().fg(theme::COPPER));
            frame.render_stateful_widget(throbber, status_row, &mut self.throbber_state.clone());
        } else if let Some(ref message) = self.form_error {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {message}"), theme::error_style())),
                status_row,
            );
        }

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Tab next field  Enter save  Esc cancel",
                theme::hint_style(),
            ))
            .alignment(Alignment::Center),
            layout[layout.len() - 1],
        );
    }
}

impl Component for DetailsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.pending {
            return Ok(None);
        }

        match self.mode {
            DetailsMode::Viewing => match key.code {
                KeyCode::Char('e') => self.enter_edit(),
                KeyCode::Esc => return Ok(Some(Action::SwitchScreen(ScreenId::Search))),
                _ => {}
            },
            DetailsMode::Editing => match key.code {
                KeyCode::Tab | KeyCode::Down => self.focus_next(),
                KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
                KeyCode::Enter => self.submit(),
                KeyCode::Esc => self.cancel_edit(),
                KeyCode::Backspace => {
                    self.draft.field_mut(self.active_field).pop();
                }
                KeyCode::Char(c) => {
                    self.draft.field_mut(self.active_field).push(c);
                }
                _ => {}
            },
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::LookupOutcome(Ok(record)) => {
                self.record = Some((**record).clone());
                self.mode = DetailsMode::Viewing;
                self.errors = muxdesk_core::FieldErrors::default();
                self.form_error = None;
            }
            Action::UpdateOutcome(result) => {
                self.pending = false;
                match result {
                    Ok(record) => {
                        self.record = Some((**record).clone());
                        self.cancel_edit();
                    }
                    Err(err) => match err.field_errors() {
                        Some(errors) => self.errors = errors.clone(),
                        None => self.form_error = Some(err.to_string()),
                    },
                }
            }
            Action::Tick => {
                if self.pending {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            area,
        );

        let inner = self.render_panel(frame, area);

        let Some(record) = &self.record else {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No circuit selected. Search for one first.",
                    theme::label_style(),
                ))
                .alignment(Alignment::Center),
                inner,
            );
            return;
        };

        match self.mode {
            DetailsMode::Viewing => self.render_viewing(frame, inner, record),
            DetailsMode::Editing => self.render_editing(frame, inner, record),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "details"
    }
}
