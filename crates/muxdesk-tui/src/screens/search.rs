//! Circuit lookup, the home screen after sign-in.
//!
//! One query field. Submit spawns a portal lookup; a miss shows the
//! not-found message naming the queried identifier, a hit opens the
//! details screen (the app handles the switch).

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;

use muxdesk_core::Portal;

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::form::FieldRow;

pub struct SearchScreen {
    portal: Portal,
    action_tx: Option<UnboundedSender<Action>>,
    focused: bool,
    query: String,
    error: Option<String>,
    /// A lookup is in flight; the input is disabled until it reports back.
    pending: bool,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl SearchScreen {
    pub fn new(portal: Portal) -> Self {
        Self {
            portal,
            action_tx: None,
            focused: false,
            query: String::new(),
            error: None,
            pending: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn submit(&mut self) {
        if self.pending || self.query.trim().is_empty() {
            return;
        }
        self.pending = true;
        self.error = None;

        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let portal = self.portal.clone();
        let circuit_id = self.query.trim().to_owned();

        tokio::spawn(async move {
            let result = portal.lookup(&circuit_id).await.map(Box::new);
            let _ = tx.send(Action::LookupOutcome(result));
        });
    }

    fn render_centered_panel(&self, frame: &mut Frame, area: Rect) -> Rect {
        let panel_w = 60u16.min(area.width.saturating_sub(4));
        let panel_h = 10u16.min(area.height.saturating_sub(2));
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
                Span::styled("Circuit Lookup", theme::title_style()),
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

impl Component for SearchScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.pending {
            return Ok(None);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
            return Ok(Some(Action::SwitchScreen(ScreenId::Register)));
        }

        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => return Ok(Some(Action::Logout)),
            KeyCode::Backspace => {
                self.query.pop();
                self.error = None;
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.error = None;
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::LookupOutcome(result) => {
                self.pending = false;
                match result {
                    Ok(_) => self.error = None,
                    Err(err) => self.error = Some(err.to_string()),
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

        let inner = self.render_centered_panel(frame, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // spacer
            Constraint::Length(1), // query
            Constraint::Length(1), // spacer
            Constraint::Length(1), // error / pending
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

        FieldRow::new("Circuit Id", &self.query)
            .focused(self.focused && !self.pending)
            .render(frame, layout[1]);

        if self.pending {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Searching...")
                .style(theme::value_style())
                .throbber_style(Style::default().fg(theme::COPPER));
            frame.render_stateful_widget(throbber, layout[3], &mut self.throbber_state.clone());
        } else if let Some(ref message) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {message}"), theme::error_style())),
                layout[3],
            );
        }

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Enter search  Ctrl+R register new  Esc sign out",
                theme::hint_style(),
            ))
            .alignment(Alignment::Center),
            layout[5],
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "search"
    }
}
