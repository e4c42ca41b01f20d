// ── Catalog identity ──
//
// Portfolio data feeds key their records either by number (`1`, `2`, ...)
// or by a slug (`"wifi-setup"`). EntryId folds both into one hashable key
// so a card trigger carrying `"2"` and a record keyed by `2` resolve to
// the same entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical identifier for a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged, from = "RawEntryId")]
pub enum EntryId {
    Numeric(u64),
    Slug(String),
}

impl EntryId {
    pub fn as_numeric(&self) -> Option<u64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Slug(_) => None,
        }
    }

    pub fn as_slug(&self) -> Option<&str> {
        match self {
            Self::Slug(s) => Some(s),
            Self::Numeric(_) => None,
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Slug(s) => f.write_str(s),
        }
    }
}

impl FromStr for EntryId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<u64> for EntryId {
    fn from(n: u64) -> Self {
        Self::Numeric(n)
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        let trimmed = s.trim();
        match trimmed.parse::<u64>() {
            Ok(n) => Self::Numeric(n),
            Err(_) => Self::Slug(trimmed.to_owned()),
        }
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

/// Wire shape accepted from data feeds before normalization.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntryId {
    Number(u64),
    Text(String),
}

impl From<RawEntryId> for EntryId {
    fn from(raw: RawEntryId) -> Self {
        match raw {
            RawEntryId::Number(n) => Self::Numeric(n),
            RawEntryId::Text(s) => Self::from(s),
        }
    }
}
