//! Screen implementations. Each screen is a top-level Component.

pub mod contact;
pub mod projects;

use folio_config::ThemeMode;
use folio_core::SocialLink;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components for the tab bar.
pub fn create_screens(
    mode: ThemeMode,
    social: &[SocialLink],
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Projects,
            Box::new(projects::ProjectsScreen::new(mode)),
        ),
        (
            ScreenId::Contact,
            Box::new(contact::ContactScreen::new(mode, social.to_vec())),
        ),
    ]
}
