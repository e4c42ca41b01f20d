//! Headless behavior layer for the folio project showcase.
//!
//! Everything here is synchronous and runs on a virtual clock; the host
//! (the terminal front end, or a test double) feeds in user interactions
//! and advances time.
//!
//! - **[`Showcase`]**: Facade owning the catalog, the controllers, the
//!   shared [`TimerQueue`] and the [`Host`]. Every user-visible operation
//!   goes through it; [`tick()`](Showcase::tick) runs due continuations.
//!
//! - **[`CatalogStore`]**: Immutable, ordered map from [`EntryId`] to
//!   [`CatalogEntry`], built once at startup.
//!
//! - **[`FilterController`]**: Category selection with per-card
//!   enter/exit sequencing. Superseded transitions are cancelled.
//!
//! - **[`OverlayController`]**: At-most-one detail overlay with scroll
//!   lock, guarded dismissal, and delayed link navigation.
//!
//! - **[`NotificationService`]**: Queue-of-one transient message that
//!   auto-dismisses.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod host;
pub mod model;
pub mod notify;
pub mod overlay;
pub mod showcase;
pub mod timer;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::CatalogStore;
pub use config::Timings;
pub use error::{CatalogError, FilterError};
pub use filter::{ALL_TOKEN, Card, CardPhase, CategoryFilter, FilterButton, FilterController};
pub use host::{Host, Navigator, ScrollState, Viewport};
pub use model::{CatalogEntry, EntryId, ExternalLinks, LinkKind, SocialLink};
pub use notify::{Notification, NotificationPhase, NotificationService, Severity};
pub use overlay::{
    DismissTrigger, OpenOutcome, OverlayController, OverlayPhase, OverlayState, OverlaySurface,
    PointerTarget,
};
pub use showcase::{Deferred, Showcase};
pub use timer::{TimerHandle, TimerQueue};
