//! Configuration for folio.
//!
//! A small TOML file holds the visitor's theme preference, an optional
//! catalog path, the owner's social links and the showcase timings. The
//! app only ever writes the `theme` key back; everything else in the file
//! is the user's. This crate also loads catalog
//! feeds from TOML or JSON files into a validated `CatalogStore`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::{debug, warn};

use folio_core::{CatalogEntry, CatalogError, CatalogStore, SocialLink, Timings};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to parse {}: {source}", path.display())]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Color scheme preference. The only setting the visitor changes at runtime.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Longest delay accepted for any timing, in milliseconds.
pub const MAX_TIMING_MS: u64 = 60_000;

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeMode,

    /// Catalog feed to load instead of the built-in entries.
    pub catalog: Option<PathBuf>,

    /// Profiles listed on the contact screen. A `[[social]]` list in the
    /// file replaces the defaults entirely.
    #[serde(default = "SocialLink::defaults")]
    pub social: Vec<SocialLink>,

    #[serde(default)]
    pub timings: Timings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            catalog: None,
            social: SocialLink::defaults(),
            timings: Timings::default(),
        }
    }
}

impl Config {
    /// Reject timings no visitor would sit through and social links that
    /// could not be shown or opened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, link) in self.social.iter().enumerate() {
            if link.platform.trim().is_empty() || link.url.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("social[{i}]"),
                    reason: "platform and url must not be empty".into(),
                });
            }
        }

        let t = &self.timings;
        let fields = [
            ("notification_display_ms", t.notification_display_ms),
            ("notification_exit_ms", t.notification_exit_ms),
            ("overlay_close_ms", t.overlay_close_ms),
            ("link_delay_ms", t.link_delay_ms),
            ("card_reveal_ms", t.card_reveal_ms),
            ("card_exit_ms", t.card_exit_ms),
        ];
        for (field, value) in fields {
            if value > MAX_TIMING_MS {
                return Err(ConfigError::Validation {
                    field: format!("timings.{field}"),
                    reason: format!("{value} ms exceeds the {MAX_TIMING_MS} ms limit"),
                });
            }
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "folio", "folio").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("folio");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `path`, layered over defaults and under `FOLIO_*`
/// environment variables (`FOLIO_TIMINGS__LINK_DELAY_MS=800`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FOLIO_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    debug!(path = %path.display(), theme = %config.theme, "config loaded");
    Ok(config)
}

/// Config for one run of the app, plus the file the theme may be written
/// back to. A file that fails to load is left alone: defaults are used and
/// no write-back path is returned.
pub fn load_config_or_default(path: &Path) -> (Config, Option<PathBuf>) {
    match load_config_from(path) {
        Ok(config) => (config, Some(path.to_path_buf())),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config unusable, using defaults");
            (Config::default(), None)
        }
    }
}

// ── Theme persistence ───────────────────────────────────────────────

/// Set the `theme` key in the file at `path`, keeping every other key as
/// the user wrote it. Creates the file when it does not exist yet.
pub fn save_theme_to(path: &Path, theme: ThemeMode) -> Result<(), ConfigError> {
    let mut table = match std::fs::read_to_string(path) {
        Ok(raw) => raw
            .parse::<toml::Table>()
            .map_err(|source| ConfigError::TomlParse {
                path: path.to_path_buf(),
                source,
            })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
        Err(e) => return Err(e.into()),
    };
    table.insert("theme".into(), toml::Value::String(theme.to_string()));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(&table)?)?;
    debug!(path = %path.display(), %theme, "theme saved");
    Ok(())
}

// ── Catalog feeds ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    entries: Vec<CatalogEntry>,
}

/// JSON feeds come either as a bare array or wrapped in `{ "entries": [] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonFeed {
    List(Vec<CatalogEntry>),
    Wrapped(CatalogFile),
}

/// Load and validate a catalog feed. The format follows the extension:
/// `.toml` expects `[[entries]]` tables, `.json` an array or an object
/// with an `entries` array.
pub fn load_catalog(path: &Path) -> Result<CatalogStore, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let entries = match ext.as_deref() {
        Some("toml") => {
            toml::from_str::<CatalogFile>(&raw)
                .map_err(|source| ConfigError::TomlParse {
                    path: path.to_path_buf(),
                    source,
                })?
                .entries
        }
        Some("json") => match serde_json::from_str::<JsonFeed>(&raw).map_err(|source| {
            ConfigError::JsonParse {
                path: path.to_path_buf(),
                source,
            }
        })? {
            JsonFeed::List(entries) | JsonFeed::Wrapped(CatalogFile { entries }) => entries,
        },
        other => {
            return Err(ConfigError::Validation {
                field: "catalog".into(),
                reason: format!(
                    "unsupported catalog format '{}', expected .toml or .json",
                    other.unwrap_or("")
                ),
            });
        }
    };

    let store = CatalogStore::new(entries)?;
    debug!(path = %path.display(), entries = store.len(), "catalog loaded");
    Ok(store)
}
