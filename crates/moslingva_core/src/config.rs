//! Archive configuration.
//!
//! # Responsibility
//! - Describe where the archive stores data, logs and exports.
//! - Carry defaults for optional fields (lexicon category, canvas size).
//!
//! # Invariants
//! - Every field has a default; a missing config file section never fails.
//! - Unknown keys are rejected so typos do not silently fall back.
//! - A blank default lexicon category is rejected at load time.

use crate::logging::default_log_level;
use crate::model::lexicon::EntryDefaults;
use crate::stroke::CanvasSize;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_EXPORT_DIR: &str = "exports";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Runtime configuration for one archive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    /// SQLite file; `None` keeps the archive in memory.
    pub db_path: Option<PathBuf>,
    /// Directory receiving JSON/SVG/PDF exports.
    pub export_dir: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute log directory; `None` leaves logging to the host.
    pub log_dir: Option<PathBuf>,
    /// Drawing surface used when serializing strokes.
    pub canvas: CanvasSize,
    pub entry_defaults: EntryDefaults,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            log_level: default_log_level().to_string(),
            log_dir: None,
            canvas: CanvasSize::default(),
            entry_defaults: EntryDefaults::default(),
        }
    }
}

impl ArchiveConfig {
    /// File-backed configuration with every other field defaulted.
    pub fn with_db_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Loads configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
