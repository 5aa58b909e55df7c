//! Application core: event loop, screen routing, action dispatch.
//!
//! The active screen is a plain [`ScreenId`] value owned here; every
//! transition goes through `Action::SwitchScreen`, and screens that need
//! a session are unreachable while none is held. Portal calls are spawned
//! by the screens and re-enter this loop as outcome actions.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use muxdesk_core::{Portal, Session};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// The session held after a successful login, dropped on logout.
    session: Option<Session>,
    /// How long toasts and success notices stay up.
    notice_duration: Duration,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    /// Terminal size for responsive layout.
    terminal_size: (u16, u16),
    /// Action sender; screens dispatch spawned-call outcomes through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver; the main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(portal: &Portal, notice_duration: Duration) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(portal).into_iter().collect();

        Self {
            active_screen: ScreenId::Login,
            screens,
            running: true,
            session: None,
            notice_duration,
            notification: None,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("portal event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("portal event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Every screen is a form, so the only
    /// global binding is Ctrl+C; everything else goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Any keypress clears the active toast; the key still goes through.
        if self.notification.is_some() {
            self.action_tx.send(Action::DismissNotification)?;
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Process a single action: update app state and propagate to screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            Action::Render => {}

            Action::Tick => {
                // Auto-dismiss the toast after the configured notice window.
                if let Some((_, shown)) = &self.notification {
                    if shown.elapsed() > self.notice_duration {
                        self.notification = None;
                    }
                }
                // Throbber animation on whichever screen has a call pending.
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    let _ = screen.update(action);
                }
            }

            Action::SwitchScreen(target) => self.switch_screen(*target),

            Action::Logout => {
                if let Some(session) = self.session.take() {
                    info!(username = %session.username, "signed out");
                }
                self.switch_screen(ScreenId::Login);
                self.action_tx
                    .send(Action::Notify(Notification::info("Signed out")))?;
            }

            // ── Portal operation outcomes ─────────────────────────────
            // Routed to every screen first (the owner clears its pending
            // state, the details screen caches looked-up records), then the
            // app applies its own transitions.
            Action::LoginOutcome(result) => {
                self.forward_to_screens(action)?;
                if let Ok(session) = result {
                    info!(username = %session.username, "signed in");
                    self.session = Some(session.clone());
                    self.switch_screen(ScreenId::Search);
                    self.action_tx.send(Action::Notify(Notification::success(
                        format!("Signed in as {}", session.username),
                    )))?;
                }
            }

            Action::LookupOutcome(result) => {
                self.forward_to_screens(action)?;
                if let Ok(record) = result {
                    debug!(circuit_id = %record.circuit_id, "lookup hit, opening details");
                    self.switch_screen(ScreenId::Details);
                }
            }

            Action::RegisterOutcome(result) => {
                self.forward_to_screens(action)?;
                if let Ok(record) = result {
                    self.action_tx.send(Action::Notify(Notification::success(
                        format!("Circuit {} registered", record.circuit_id),
                    )))?;
                    // Return to search once the success notice has had its
                    // moment. The form ignores input in the meantime.
                    let tx = self.action_tx.clone();
                    let delay = self.notice_duration;
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(Action::SwitchScreen(ScreenId::Search));
                    });
                }
            }

            Action::UpdateOutcome(result) => {
                self.forward_to_screens(action)?;
                if let Ok(record) = result {
                    self.action_tx.send(Action::Notify(Notification::success(
                        format!("Circuit {} updated", record.circuit_id),
                    )))?;
                }
            }

            // ── Notifications ─────────────────────────────────────────
            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }
        }

        Ok(())
    }

    /// Route an action to every screen, dispatching any follow-ups.
    fn forward_to_screens(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Move focus to `target`. Screens that need a session are unreachable
    /// while none is held.
    fn switch_screen(&mut self, target: ScreenId) {
        if target.requires_session() && self.session.is_none() {
            warn!(screen = %target, "ignoring switch to session-gated screen");
            return;
        }
        if target == self.active_screen {
            return;
        }
        debug!("switching screen: {} \u{2192} {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // The login gate gets the full frame; no status bar before sign-in.
        if self.active_screen == ScreenId::Login {
            if let Some(screen) = self.screens.get(&ScreenId::Login) {
                screen.render(frame, area);
            }
            if let Some((ref notification, _)) = self.notification {
                self.render_notification(frame, area, notification);
            }
            return;
        }

        let layout = Layout::vertical([
            Constraint::Min(1),    // screen content
            Constraint::Length(1), // status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_status_bar(frame, layout[1]);

        if let Some((ref notification, _)) = self.notification {
            self.render_notification(frame, area, notification);
        }
    }

    /// Bottom status bar: screen label, signed-in user, quit hint.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let username = self
            .session
            .as_ref()
            .map_or("\u{2014}", |session| session.username.as_str());

        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.active_screen), theme::title_style()),
            Span::styled(
                format!("\u{2502} {username}"),
                Style::default().fg(theme::LINE_BLUE),
            ),
            Span::styled("  \u{2502} Ctrl+C quit", theme::hint_style()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render a notification toast in the bottom-right corner.
    #[allow(clippy::unused_self)]
    fn render_notification(&self, frame: &mut Frame, area: Rect, notification: &Notification) {
        #[allow(clippy::cast_possible_truncation)]
        let msg_len = notification.message.chars().count() as u16;
        let width = (msg_len + 6).clamp(20, 60);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notification.level {
            NotificationLevel::Success => (theme::SUCCESS_GREEN, "\u{2713}"),
            NotificationLevel::Info => (theme::LINE_BLUE, "\u{00b7}"),
        };

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notification.message, theme::value_style()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}
