//! Lexicon entry model.
//!
//! # Responsibility
//! - Define stored lexicon entries and caller-facing write fields.
//! - Apply `EntryDefaults` before validation.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused.
//! - `headword`, `translation1`, `translation2`, `phonetic` are non-empty.
//! - `category` is never empty once resolved.

use super::{optional_text, require_text, ValidationError};
use serde::{Deserialize, Deserializer, Serialize};

/// Storage-assigned lexicon identity.
pub type EntryId = i64;

/// Category applied when a caller leaves it blank.
pub const DEFAULT_CATEGORY: &str = "general";

/// Category filter sentinel that disables category filtering.
pub const CATEGORY_ALL: &str = "all";

/// Categories offered by the dictionary editor. Stored categories are not
/// limited to this list.
pub const CATEGORIES: &[&str] = &[
    "Salutations",
    "Nombres",
    "Verbes",
    "Pronoms",
    "Adjectifs",
    "Noms",
    "Autre",
];

/// Starter lexicon row: `(headword, french, english, phonetic, category)`.
pub type StarterWord = (&'static str, &'static str, &'static str, &'static str, &'static str);

/// Words a fresh archive is seeded with.
pub const STARTER_WORDS: &[StarterWord] = &[
    ("Paradej", "Bonjour", "Hello", "PA-RA-DE-J", "Salutations"),
    ("O aijdenai dei", "Je t'aime", "I love you", "O-A-I-J-DE-NAI-DEI", "Salutations"),
    ("NULA", "Zéro", "Zero", "NU-LA", "Nombres"),
    ("UNA", "Un", "One", "U-NA", "Nombres"),
    ("DUA", "Deux", "Two", "DU-A", "Nombres"),
    ("TRIA", "Trois", "Three", "TRI-A", "Nombres"),
    ("CINK", "Cinq", "Five", "CINK", "Nombres"),
    ("DECIM", "Dix", "Ten", "DE-CIM", "Nombres"),
];

/// Iterates [`STARTER_WORDS`] as write fields, in catalog order.
pub fn starter_lexicon() -> impl Iterator<Item = EntryFields> {
    STARTER_WORDS
        .iter()
        .map(|(headword, french, english, phonetic, category)| {
            EntryFields::new(*headword, *french, *english, *phonetic).with_category(*category)
        })
}

/// Stored lexicon entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub id: EntryId,
    /// Constructed-language term.
    pub headword: String,
    /// French gloss.
    pub translation1: String,
    /// English gloss.
    pub translation2: String,
    /// Pronunciation guide, e.g. `PA-RA-DE-J`.
    pub phonetic: String,
    pub category: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
}

/// Write fields supplied by callers for add/update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    pub headword: String,
    pub translation1: String,
    pub translation2: String,
    pub phonetic: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl EntryFields {
    pub fn new(
        headword: impl Into<String>,
        translation1: impl Into<String>,
        translation2: impl Into<String>,
        phonetic: impl Into<String>,
    ) -> Self {
        Self {
            headword: headword.into(),
            translation1: translation1.into(),
            translation2: translation2.into(),
            phonetic: phonetic.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Applies defaults, then validates and trims every field.
    pub fn resolve(&self, defaults: &EntryDefaults) -> Result<ResolvedEntry, ValidationError> {
        let category = optional_text(self.category.as_deref())
            .unwrap_or_else(|| defaults.category.clone());
        Ok(ResolvedEntry {
            headword: require_text("headword", &self.headword)?,
            translation1: require_text("translation1", &self.translation1)?,
            translation2: require_text("translation2", &self.translation2)?,
            phonetic: require_text("phonetic", &self.phonetic)?,
            category: require_text("category", &category)?,
        })
    }
}

/// Defaults for optional lexicon fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntryDefaults {
    #[serde(deserialize_with = "non_blank_category")]
    pub category: String,
}

fn non_blank_category<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    require_text("entry_defaults.category", &raw).map_err(serde::de::Error::custom)
}

impl Default for EntryDefaults {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// Fully validated entry fields; the only shape repositories accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub headword: String,
    pub translation1: String,
    pub translation2: String,
    pub phonetic: String,
    pub category: String,
}

/// Field a translation lookup matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationSource {
    Headword,
    Translation1,
    Translation2,
}

impl TranslationSource {
    pub fn field<'a>(self, entry: &'a LexiconEntry) -> &'a str {
        match self {
            Self::Headword => &entry.headword,
            Self::Translation1 => &entry.translation1,
            Self::Translation2 => &entry.translation2,
        }
    }
}
