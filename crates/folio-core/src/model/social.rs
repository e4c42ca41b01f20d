// ── Social link ──
//
// A profile elsewhere (GitHub, LinkedIn, ...) listed beside the contact
// form. Unlike catalog links these belong to the portfolio owner, not to
// a project.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Display name, also used in the "Opening ..." feedback.
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
        }
    }

    pub fn opening_message(&self) -> String {
        format!("Opening {}...", self.platform)
    }

    /// Profiles shown when the config lists none.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("GitHub", "https://github.com/yourusername"),
            Self::new("LinkedIn", "https://www.linkedin.com/in/yourusername"),
            Self::new("Twitter", "https://twitter.com/yourusername"),
        ]
    }
}
