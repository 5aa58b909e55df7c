//! All possible UI actions. Actions are the sole mechanism for state
//! mutation: key handlers and spawned portal calls both feed results back
//! into the app loop as actions.

use muxdesk_core::{CircuitRecord, CoreError, Session};

use crate::screen::ScreenId;

/// Notification severity level. There is no error level: failures are
/// rendered inline by the owning screen, never as a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
}

/// A toast notification, shown in the footer until it expires.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    /// Drop the session and return to the login gate.
    Logout,

    // ── Portal operation results ──────────────────────────────────
    // Spawned portal calls report back through these; the app routes
    // them to every screen, then applies its own transitions.
    LoginOutcome(Result<Session, CoreError>),
    LookupOutcome(Result<Box<CircuitRecord>, CoreError>),
    RegisterOutcome(Result<Box<CircuitRecord>, CoreError>),
    UpdateOutcome(Result<Box<CircuitRecord>, CoreError>),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
