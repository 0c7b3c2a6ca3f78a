//! Lexicon use-case service.
//!
//! # Responsibility
//! - Apply entry defaults and validation before persistence.
//! - Provide search and translation as read-only projections over the list.
//!
//! # Invariants
//! - Search never mutates storage and is recomputed from current rows.
//! - Search and translation keep headword order.
//! - An unknown id is reported as `EntryNotFound`, never as a storage error.

use crate::model::lexicon::{
    starter_lexicon, EntryDefaults, EntryFields, EntryId, LexiconEntry, TranslationSource,
    CATEGORY_ALL,
};
use crate::model::ValidationError;
use crate::repo::lexicon_repo::LexiconRepository;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for lexicon use-cases.
#[derive(Debug)]
pub enum LexiconServiceError {
    /// Caller input rejected before any storage call.
    Validation(ValidationError),
    /// Target entry does not exist.
    EntryNotFound(EntryId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write succeeded but read-back disagreed.
    InconsistentState(&'static str),
}

impl Display for LexiconServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::EntryNotFound(id) => write!(f, "lexicon entry not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent lexicon state: {details}")
            }
        }
    }
}

impl Error for LexiconServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for LexiconServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for LexiconServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EntryNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub struct LexiconService<R: LexiconRepository> {
    repo: R,
    defaults: EntryDefaults,
}

impl<R: LexiconRepository> LexiconService<R> {
    pub fn new(repo: R, defaults: EntryDefaults) -> Self {
        Self { repo, defaults }
    }

    /// Adds one entry and returns it as stored, with its assigned id.
    pub fn add_entry(&self, fields: &EntryFields) -> Result<LexiconEntry, LexiconServiceError> {
        let resolved = fields.resolve(&self.defaults)?;
        let id = self.repo.add_entry(&resolved)?;
        self.repo
            .get_entry(id)?
            .ok_or(LexiconServiceError::InconsistentState(
                "created entry not found in read-back",
            ))
    }

    /// Replaces every mutable field of entry `id`.
    pub fn update_entry(
        &self,
        id: EntryId,
        fields: &EntryFields,
    ) -> Result<LexiconEntry, LexiconServiceError> {
        let resolved = fields.resolve(&self.defaults)?;
        self.repo.update_entry(id, &resolved)?;
        self.repo
            .get_entry(id)?
            .ok_or(LexiconServiceError::InconsistentState(
                "updated entry not found in read-back",
            ))
    }

    /// Seeds the starter words into an empty lexicon.
    ///
    /// Returns the number of inserted entries; `0` when the lexicon already
    /// holds entries.
    pub fn seed_starter_lexicon(&self) -> Result<usize, LexiconServiceError> {
        let entries = starter_lexicon()
            .map(|fields| fields.resolve(&self.defaults))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.repo.seed_entries(&entries)?)
    }

    pub fn delete_entry(&self, id: EntryId) -> Result<(), LexiconServiceError> {
        self.repo.delete_entry(id)?;
        Ok(())
    }

    pub fn get_entry(&self, id: EntryId) -> RepoResult<Option<LexiconEntry>> {
        self.repo.get_entry(id)
    }

    pub fn list_entries(&self) -> RepoResult<Vec<LexiconEntry>> {
        self.repo.list_entries()
    }

    pub fn list_categories(&self) -> RepoResult<Vec<String>> {
        self.repo.list_categories()
    }

    /// Filters the current lexicon by free-text term and category.
    pub fn search(&self, term: &str, category: &str) -> RepoResult<Vec<LexiconEntry>> {
        let entries = self.repo.list_entries()?;
        Ok(filter_entries(entries, term, category))
    }

    /// Exact, case-insensitive lookup of `term` in the `source` field.
    ///
    /// Returns the first match in headword order.
    pub fn translate(
        &self,
        term: &str,
        source: TranslationSource,
    ) -> RepoResult<Option<LexiconEntry>> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        Ok(self
            .repo
            .list_entries()?
            .into_iter()
            .find(|entry| source.field(entry).trim().to_lowercase() == needle))
    }
}

/// Pure search projection.
///
/// - `category == "all"` keeps every category; anything else is an exact match.
/// - An empty `term` keeps every entry; otherwise the lowercased term, spaces
///   included, must be a substring of the lowercased headword, either
///   translation, or phonetic.
pub fn filter_entries(
    entries: impl IntoIterator<Item = LexiconEntry>,
    term: &str,
    category: &str,
) -> Vec<LexiconEntry> {
    let needle = term.to_lowercase();
    entries
        .into_iter()
        .filter(|entry| category == CATEGORY_ALL || entry.category == category)
        .filter(|entry| needle.is_empty() || matches_term(entry, &needle))
        .collect()
}

fn matches_term(entry: &LexiconEntry, needle: &str) -> bool {
    [
        &entry.headword,
        &entry.translation1,
        &entry.translation2,
        &entry.phonetic,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::filter_entries;
    use crate::model::lexicon::LexiconEntry;

    fn entry(id: i64, headword: &str, translation2: &str, category: &str) -> LexiconEntry {
        LexiconEntry {
            id,
            headword: headword.to_string(),
            translation1: String::from("fr"),
            translation2: translation2.to_string(),
            phonetic: headword.to_uppercase(),
            category: category.to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn empty_term_and_all_category_keep_everything() {
        let entries = vec![entry(1, "Cink", "five", "Nombres"), entry(2, "Paradej", "Hello", "Salutations")];
        assert_eq!(filter_entries(entries.clone(), "", "all"), entries);
    }

    #[test]
    fn whitespace_term_is_matched_literally() {
        let entries = vec![
            entry(1, "O aijdenai dei", "I love you", "Salutations"),
            entry(2, "Una", "one", "Nombres"),
        ];
        let spaced = filter_entries(entries.clone(), " ", "all");
        assert_eq!(spaced.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);

        assert!(filter_entries(entries.clone(), "dei ", "all").is_empty());
        assert_eq!(filter_entries(entries, "dei", "all").len(), 1);
    }

    #[test]
    fn term_matches_any_field_case_insensitively() {
        let entries = vec![
            entry(1, "O aijdenai dei", "I love you", "Salutations"),
            entry(2, "Una", "one", "Nombres"),
        ];
        let hits = filter_entries(entries, "LOVE", "all");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn category_is_exact_and_combines_with_term() {
        let entries = vec![
            entry(1, "Dua", "two", "Nombres"),
            entry(2, "Duat", "twice", "nombres"),
            entry(3, "Una", "one", "Nombres"),
        ];
        let hits = filter_entries(entries, "du", "Nombres");
        assert_eq!(hits.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
    }
}
