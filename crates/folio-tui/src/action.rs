//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use folio_config::ThemeMode;
use folio_core::{
    CardPhase, CatalogEntry, DismissTrigger, EntryId, FilterButton, LinkKind, Severity, SocialLink,
};

use crate::screen::ScreenId;

/// A card as the projects screen draws it.
#[derive(Debug, Clone)]
pub struct CardView {
    pub entry: Arc<CatalogEntry>,
    pub phase: CardPhase,
}

/// Render snapshot of the showcase, published after every change.
#[derive(Debug, Clone, Default)]
pub struct ShowcaseView {
    pub filters: Vec<FilterButton>,
    /// Cards still occupying layout, in catalog order.
    pub cards: Vec<CardView>,
    /// First card row in view.
    pub scroll_offset: u32,
    /// User scrolling is refused while the overlay is up.
    pub scroll_locked: bool,
}

/// Submitted contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ─────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,

    // ── Showcase ──────────────────────────────────────────────────
    SelectFilter(usize),
    OpenEntry(EntryId),
    Dismiss(DismissTrigger),
    OpenLink(LinkKind),
    Scroll(i32),
    ShowcaseChanged(Arc<ShowcaseView>),

    // ── Page actions ──────────────────────────────────────────────
    ToggleTheme,
    ThemeChanged(ThemeMode),
    DownloadCv,
    SubmitContact(ContactMessage),
    Subscribe(String),
    OpenSocial(SocialLink),

    // ── Notifications ─────────────────────────────────────────────
    Notify(String, Severity),
    DismissNotification,
}
