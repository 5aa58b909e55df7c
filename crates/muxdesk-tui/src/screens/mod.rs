//! Screen implementations. Each screen is a top-level [`Component`].

pub mod details;
pub mod login;
pub mod register;
pub mod search;

use muxdesk_core::Portal;

use crate::component::Component;
use crate::screen::ScreenId;

/// Build every screen, each with its own handle to the shared portal.
pub fn create_screens(portal: &Portal) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Login,
            Box::new(login::LoginScreen::new(portal.clone())) as Box<dyn Component>,
        ),
        (
            ScreenId::Search,
            Box::new(search::SearchScreen::new(portal.clone())),
        ),
        (
            ScreenId::Details,
            Box::new(details::DetailsScreen::new(portal.clone())),
        ),
        (
            ScreenId::Register,
            Box::new(register::RegisterScreen::new(portal.clone())),
        ),
    ]
}
