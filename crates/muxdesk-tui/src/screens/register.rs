//! New-circuit registration form.
//!
//! All ten fields start empty. Submit validates every field and shows
//! inline errors on failure; on success the app shows a transient notice
//! and returns to the search screen after the configured delay. While
//! that notice is up the form ignores input.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;

use muxdesk_core::{CircuitDraft, CircuitField, Portal};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::form::FieldRow;

pub struct RegisterScreen {
    portal: Portal,
    action_tx: Option<UnboundedSender<Action>>,
    focused: bool,
    draft: CircuitDraft,
    active_field: CircuitField,
    errors: muxdesk_core::FieldErrors,
    /// A register call is in flight; input is disabled until it reports back.
    pending: bool,
    /// Set after a successful registration, while the success notice is up
    /// and the delayed return to search is pending.
    registered: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl RegisterScreen {
    pub fn new(portal: Portal) -> Self {
        Self {
            portal,
            action_tx: None,
            focused: false,
            draft: CircuitDraft::default(),
            active_field: CircuitField::CircuitId,
            errors: muxdesk_core::FieldErrors::default(),
            pending: false,
            registered: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn reset(&mut self) {
        self.draft = CircuitDraft::default();
        self.active_field = CircuitField::CircuitId;
        self.errors = muxdesk_core::FieldErrors::default();
        self.registered = None;
    }

    fn focus_next(&mut self) {
        let pos = CircuitField::ALL
            .iter()
            .position(|&f| f == self.active_field)
            .unwrap_or(0);
        self.active_field = CircuitField::ALL[(pos + 1) % CircuitField::ALL.len()];
    }

    fn focus_prev(&mut self) {
        let pos = CircuitField::ALL
            .iter()
            .position(|&f| f == self.active_field)
            .unwrap_or(0);
        self.active_field =
            CircuitField::ALL[(pos + CircuitField::ALL.len() - 1) % CircuitField::ALL.len()];
    }

    /// Spawn the register call and report back through `Action::RegisterOutcome`.
    fn submit(&mut self) {
        if self.pending {
            return;
        }
        self.pending = true;

        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let portal = self.portal.clone();
        let draft = self.draft.clone();

        tokio::spawn(async move {
            let result = portal.register(&draft).await.map(Box::new);
            let _ = tx.send(Action::RegisterOutcome(result));
        });
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect) -> Rect {
        let panel_w = 72u16.min(area.width.saturating_sub(4));
        let panel_h = 19u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(panel_w)) / 2;
        let y = (area.height.saturating_sub(panel_h)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, panel_w, panel_h);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            panel,
        );

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("Register Circuit", theme::title_style()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        inner
    }
}

impl Component for RegisterScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.pending || self.registered.is_some() {
            return Ok(None);
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => return Ok(Some(Action::SwitchScreen(ScreenId::Search))),
            KeyCode::Backspace => {
                self.draft.field_mut(self.active_field).pop();
            }
            KeyCode::Char(c) => {
                self.draft.field_mut(self.active_field).push(c);
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::RegisterOutcome(result) => {
                self.pending = false;
                match result {
                    Ok(record) => {
                        self.errors = muxdesk_core::FieldErrors::default();
                        self.registered = Some(record.circuit_id.clone());
                    }
                    Err(err) => {
                        if let Some(errors) = err.field_errors() {
                            self.errors = errors.clone();
                        }
                    }
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

        let mut constraints = vec![Constraint::Length(1)]; // spacer
        constraints.extend(std::iter::repeat_n(
            Constraint::Length(1),
            CircuitField::ALL.len(),
        ));
        constraints.push(Constraint::Length(1)); // spacer
        constraints.push(Constraint::Length(1)); // status
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1)); // hints
        let layout = Layout::vertical(constraints).split(inner);

        let form_active = self.focused && !self.pending && self.registered.is_none();
        for (i, field) in CircuitField::ALL.iter().enumerate() {
            FieldRow::new(&field.display_name(), self.draft.field(*field))
                .focused(form_active && self.active_field == *field)
                .error(self.errors.get(*field))
                .render(frame, layout[i + 1]);
        }

        let status_row = layout[CircuitField::ALL.len() + 2];
        if self.pending {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Registering...")
                .style(theme::value_style())
                .throbber_style(Style::default().fg(theme::COPPER));
            frame.render_stateful_widget(throbber, status_row, &mut self.throbber_state.clone());
        } else if let Some(ref circuit_id) = self.registered {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" \u{2713} Circuit {circuit_id} registered"),
                    theme::success_style(),
                )),
                status_row,
            );
        }

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Tab next field  Enter register  Esc back to search",
                theme::hint_style(),
            ))
            .alignment(Alignment::Center),
            layout[layout.len() - 1],
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        // Arriving fresh after a completed registration starts a new form;
        // a form abandoned via Esc keeps its half-typed values.
        if focused && self.registered.is_some() {
            self.reset();
        }
    }

    fn id(&self) -> &str {
        "register"
    }
}
