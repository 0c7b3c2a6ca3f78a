//! Glyph artifact model and the fixed Moslingva alphabet.
//!
//! # Responsibility
//! - Define the stored shape of a hand-drawn glyph.
//! - Describe the alphabet the glyph editor walks through.
//!
//! # Invariants
//! - `symbol` is the storage identity; `kind` is a reclassifiable attribute.
//! - `vector_document` is a self-contained SVG string.

use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Consonants of the Moslingva alphabet, in editor order.
pub const CONSONANTS: &[&str] = &[
    "B", "D", "F", "G", "H", "J", "K", "L", "M", "N", "P", "R", "S", "T", "V", "Z",
];
/// Vowels of the Moslingva alphabet, in editor order.
pub const VOWELS: &[&str] = &["A", "E", "I", "O", "OU", "U"];
/// Digits, in editor order.
pub const DIGITS: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Semantic class of a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphKind {
    Consonant,
    Vowel,
    Digit,
}

impl GlyphKind {
    /// Storage label, also used for ordering in `list_glyphs`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Consonant => "consonant",
            Self::Vowel => "vowel",
            Self::Digit => "digit",
        }
    }

    /// Alphabet symbols belonging to this kind.
    pub fn catalog(self) -> &'static [&'static str] {
        match self {
            Self::Consonant => CONSONANTS,
            Self::Vowel => VOWELS,
            Self::Digit => DIGITS,
        }
    }
}

impl Display for GlyphKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlyphKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "consonant" => Ok(Self::Consonant),
            "vowel" => Ok(Self::Vowel),
            "digit" => Ok(Self::Digit),
            other => Err(ValidationError::InvalidValue {
                field: "kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Stored glyph artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub kind: GlyphKind,
    pub symbol: String,
    pub vector_document: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds; moves only when kind or document change.
    pub updated_at: i64,
}

/// Validated glyph write, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphDraft {
    pub kind: GlyphKind,
    pub symbol: String,
    pub vector_document: String,
}

impl GlyphDraft {
    /// Validates caller input. The symbol is trimmed; the document is kept
    /// verbatim so serialized bytes survive unchanged.
    pub fn new(
        kind: GlyphKind,
        symbol: &str,
        vector_document: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let symbol = require_text("symbol", symbol)?;
        let vector_document = vector_document.into();
        if vector_document.trim().is_empty() {
            return Err(ValidationError::EmptyField("vector_document"));
        }
        Ok(Self {
            kind,
            symbol,
            vector_document,
        })
    }
}

/// Iterates the full alphabet as `(kind, symbol)` in editor order.
pub fn alphabet() -> impl Iterator<Item = (GlyphKind, &'static str)> {
    [GlyphKind::Consonant, GlyphKind::Vowel, GlyphKind::Digit]
        .into_iter()
        .flat_map(|kind| kind.catalog().iter().map(move |symbol| (kind, *symbol)))
}
