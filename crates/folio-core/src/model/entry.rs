// ── Catalog entry ──
//
// One portfolio project as supplied by the data feed. Only `id`, `title`
// and `category` are required; every other field degrades to empty so a
// sparse record still renders a complete (if short) overlay.

use serde::{Deserialize, Serialize};

use super::EntryId;

/// A single portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Bullet facts, shown in order.
    #[serde(default)]
    pub details: Vec<String>,
    /// Short technology labels, shown in order.
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, flatten)]
    pub links: ExternalLinks,
}

impl CatalogEntry {
    /// Link target for the given affordance, if the entry has one.
    pub fn link(&self, kind: LinkKind) -> Option<&str> {
        match kind {
            LinkKind::Repository => self.links.repository.as_deref(),
            LinkKind::Demo => self.links.demo.as_deref(),
        }
        .filter(|url| !url.trim().is_empty())
    }
}

/// Outbound references. Opaque strings; never validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLinks {
    #[serde(default, alias = "github")]
    pub repository: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
}

/// The two action affordances in the detail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Repository,
    Demo,
}

impl LinkKind {
    /// Feedback shown before the navigation fires.
    pub fn opening_message(self) -> &'static str {
        match self {
            Self::Repository => "Opening GitHub repository...",
            Self::Demo => "Opening live demo in new tab...",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Repository => "GitHub repository",
            Self::Demo => "live demo",
        }
    }
}
