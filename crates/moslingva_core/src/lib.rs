//! Core persistence and retrieval layer for the Moslingva archive.
//! This crate is the single source of truth for glyph, lexicon and grammar
//! invariants; UI layers call in through [`Archive`].

pub mod config;
pub mod db;
pub mod export;
pub mod facade;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stroke;

pub use config::{ArchiveConfig, ConfigError};
pub use export::{ExportError, ExportFormat, Exporter};
pub use facade::{Archive, ArchiveError, ArchiveResult, SaveCharacterRequest};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::glyph::{Glyph, GlyphDraft, GlyphKind};
pub use model::grammar::{GrammarNote, NoteDraft};
pub use model::lexicon::{
    starter_lexicon, EntryDefaults, EntryFields, EntryId, LexiconEntry, ResolvedEntry,
    StarterWord, TranslationSource, CATEGORIES, CATEGORY_ALL, DEFAULT_CATEGORY, STARTER_WORDS,
};
pub use model::ValidationError;
pub use repo::glyph_repo::{GlyphRepository, SqliteGlyphRepository};
pub use repo::grammar_repo::{GrammarNoteRepository, SqliteGrammarNoteRepository};
pub use repo::lexicon_repo::{LexiconRepository, SqliteLexiconRepository};
pub use repo::{RepoError, RepoResult};
pub use service::glyph_service::{AlphabetProgress, GlyphService, GlyphServiceError};
pub use service::grammar_service::GrammarService;
pub use service::lexicon_service::{filter_entries, LexiconService, LexiconServiceError};
pub use stroke::{serialize_polyline, CanvasSize, Point, Polyline, StrokeCapture, StrokeError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
