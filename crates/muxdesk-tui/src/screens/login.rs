//! Sign-in gate shown before anything else.
//!
//! Two fields checked against the configured demo pair. The gate is a
//! placeholder over mock data, not a security boundary; a failure shows
//! the generic invalid-credentials message and nothing more.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;

use muxdesk_core::Portal;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form::FieldRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Username,
    Password,
}

impl LoginField {
    fn next(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Username,
        }
    }
}

pub struct LoginScreen {
    portal: Portal,
    action_tx: Option<UnboundedSender<Action>>,
    focused: bool,
    active_field: LoginField,
    username_input: String,
    password_input: String,
    error: Option<String>,
    /// A login call is in flight; Enter is ignored until it reports back.
    pending: bool,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl LoginScreen {
    pub fn new(portal: Portal) -> Self {
        Self {
            portal,
            action_tx: None,
            focused: false,
            active_field: LoginField::Username,
            username_input: String::new(),
            password_input: String::new(),
            error: None,
            pending: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.active_field {
            LoginField::Username => &mut self.username_input,
            LoginField::Password => &mut self.password_input,
        }
    }

    /// Spawn the login call and report back through `Action::LoginOutcome`.
    fn submit(&mut self) {
        if self.pending {
            return;
        }
        self.pending = true;
        self.error = None;

        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let portal = self.portal.clone();
        let username = self.username_input.clone();
        let password = self.password_input.clone();

        tokio::spawn(async move {
            let result = portal.login(&username, &password).await;
            let _ = tx.send(Action::LoginOutcome(result));
        });
    }

    fn render_centered_panel(&self, frame: &mut Frame, area: Rect) -> Rect {
        let panel_w = 52u16.min(area.width.saturating_sub(4));
        let panel_h = 12u16.min(area.height.saturating_sub(2));
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
                Span::styled("Muxdesk \u{2014} Sign In", theme::title_style()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        inner
    }
}

impl Component for LoginScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.pending {
            return Ok(None);
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
                self.active_field = self.active_field.next();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.active_input_mut().pop();
                self.error = None;
            }
            KeyCode::Char(c) => {
                self.active_input_mut().push(c);
                self.error = None;
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::LoginOutcome(result) => {
                self.pending = false;
                match result {
                    Ok(_) => {
                        // The app stores the session and switches screens;
                        // clear the password so it does not linger.
                        self.password_input.clear();
                        self.error = None;
                    }
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
            Constraint::Length(1), // username
            Constraint::Length(1), // password
            Constraint::Length(1), // spacer
            Constraint::Length(1), // error / pending
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

        FieldRow::new("Username", &self.username_input)
            .focused(self.focused && !self.pending && self.active_field == LoginField::Username)
            .render(frame, layout[1]);

        FieldRow::new("Password", &self.password_input)
            .focused(self.focused && !self.pending && self.active_field == LoginField::Password)
            .masked(true)
            .render(frame, layout[2]);

        if self.pending {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Signing in...")
                .style(theme::value_style())
                .throbber_style(Style::default().fg(theme::COPPER));
            frame.render_stateful_widget(throbber, layout[4], &mut self.throbber_state.clone());
        } else if let Some(ref message) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {message}"), theme::error_style())),
                layout[4],
            );
        }

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Tab switch field  Enter sign in  Ctrl+C quit",
                theme::hint_style(),
            ))
            .alignment(Alignment::Center),
            layout[6],
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "login"
    }
}
