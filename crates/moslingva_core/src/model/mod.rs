//! Domain model for the Moslingva archive.
//!
//! # Responsibility
//! - Define canonical records for glyphs, lexicon entries and grammar notes.
//! - Own input validation and defaulting so storage never sees bad rows.
//!
//! # Invariants
//! - Identities and timestamps are assigned by storage, never by callers.
//! - Required text fields are validated before any SQL is issued.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod glyph;
pub mod grammar;
pub mod lexicon;

/// Rejected caller input, raised before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty or whitespace only.
    EmptyField(&'static str),
    /// Field holds a value outside its allowed set.
    InvalidValue { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` must not be empty"),
            Self::InvalidValue { field, value } => {
                write!(f, "invalid value `{value}` for `{field}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional value, collapsing blanks to `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
