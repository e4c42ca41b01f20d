//! Domain model for the showcase catalog.

mod entry;
mod entry_id;
mod social;

pub use entry::{CatalogEntry, ExternalLinks, LinkKind};
pub use entry_id::EntryId;
pub use social::SocialLink;
