// ── Core error types ──
//
// The showcase itself never fails: lookup misses and re-entrant
// open/close are reported through return values, not errors. What can
// fail is building a catalog from an untrusted feed and selecting a
// category token nobody declared.

use thiserror::Error;

use crate::model::EntryId;

/// Rejected catalog data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate catalog entry id: {id}")]
    DuplicateId { id: EntryId },

    #[error("catalog entry {id} has an empty {field}")]
    MissingField { id: EntryId, field: &'static str },
}

/// Rejected filter selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown category: {token}")]
    UnknownCategory { token: String },

    #[error("no filter button at position {index}")]
    NoSuchButton { index: usize },
}
