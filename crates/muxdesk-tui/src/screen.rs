//! Screen identifier enum -- the portal's explicit view state machine.

use std::fmt;

/// Identifies each screen. The active screen lives in `App`; transitions
/// only happen through `Action::SwitchScreen`, so the view state is a
/// plain finite-state value rather than ambient flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    /// Credential gate shown before anything else.
    #[default]
    Login,
    /// Circuit ID lookup, the home screen after login.
    Search,
    /// Read-only record view with an inline edit mode.
    Details,
    /// New-circuit registration form.
    Register,
}

impl ScreenId {
    /// Every screen, for `App` construction.
    pub const ALL: [ScreenId; 4] = [Self::Login, Self::Search, Self::Details, Self::Register];

    /// Title-bar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Search => "Circuit Lookup",
            Self::Details => "Circuit Details",
            Self::Register => "Register Circuit",
        }
    }

    /// Whether this screen is reachable without a session.
    pub fn requires_session(self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_login_is_reachable_without_a_session() {
        for screen in ScreenId::ALL {
            assert_eq!(screen.requires_session(), screen != ScreenId::Login);
        }
    }
}
