//! Application façade exposed to UI and export collaborators.
//!
//! # Responsibility
//! - Own the single SQLite handle for the archive's lifetime.
//! - Route each boundary operation to its service.
//! - Translate every failure into the `ArchiveError` taxonomy.
//!
//! # Invariants
//! - Operations before `initialize()` or after `shutdown()` fail with
//!   `StorageUnavailable`; nothing opens a handle implicitly.
//! - Failures are forwarded, never swallowed or retried.
//! - Each operation emits one `event=<op> module=facade` log line without
//!   user content.

use crate::config::ArchiveConfig;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::export::{ExportError, Exporter};
use crate::model::glyph::{Glyph, GlyphKind};
use crate::model::grammar::GrammarNote;
use crate::model::lexicon::{EntryFields, EntryId, LexiconEntry, TranslationSource};
use crate::model::ValidationError;
use crate::repo::glyph_repo::SqliteGlyphRepository;
use crate::repo::grammar_repo::SqliteGrammarNoteRepository;
use crate::repo::lexicon_repo::SqliteLexiconRepository;
use crate::repo::RepoError;
use crate::service::glyph_service::{AlphabetProgress, GlyphService, GlyphServiceError};
use crate::service::grammar_service::GrammarService;
use crate::service::lexicon_service::{LexiconService, LexiconServiceError};
use crate::stroke::{Polyline, StrokeError};
use log::{error, info, warn};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Externally visible error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveError {
    /// Required input missing or malformed; no storage call was made.
    Validation(String),
    /// Update/delete referenced an unknown identity.
    NotFound(EntryId),
    /// Archive not initialized, or the medium is unreachable/unwritable.
    StorageUnavailable(String),
    /// Write conflicted with a storage constraint.
    ConstraintViolation(String),
}

impl ArchiveError {
    /// Stable machine-readable code for logs and UI mapping.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::ConstraintViolation(_) => "constraint_violation",
        }
    }
}

impl Display for ArchiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "validation failed: {message}"),
            Self::NotFound(id) => write!(f, "not found: {id}"),
            Self::StorageUnavailable(message) => write!(f, "storage unavailable: {message}"),
            Self::ConstraintViolation(message) => write!(f, "constraint violation: {message}"),
        }
    }
}

impl Error for ArchiveError {}

impl From<ValidationError> for ArchiveError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<StrokeError> for ArchiveError {
    fn from(value: StrokeError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<DbError> for ArchiveError {
    fn from(value: DbError) -> Self {
        Self::StorageUnavailable(value.to_string())
    }
}

impl From<RepoError> for ArchiveError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => err.into(),
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Constraint(message) => Self::ConstraintViolation(message),
            other => Self::StorageUnavailable(other.to_string()),
        }
    }
}

impl From<LexiconServiceError> for ArchiveError {
    fn from(value: LexiconServiceError) -> Self {
        match value {
            LexiconServiceError::Validation(err) => err.into(),
            LexiconServiceError::EntryNotFound(id) => Self::NotFound(id),
            LexiconServiceError::Repo(err) => err.into(),
            other => Self::StorageUnavailable(other.to_string()),
        }
    }
}

impl From<GlyphServiceError> for ArchiveError {
    fn from(value: GlyphServiceError) -> Self {
        match value {
            GlyphServiceError::Stroke(err) => err.into(),
            GlyphServiceError::Repo(err) => err.into(),
        }
    }
}

impl From<ExportError> for ArchiveError {
    fn from(value: ExportError) -> Self {
        match value {
            ExportError::Io { .. } => Self::StorageUnavailable(value.to_string()),
            other => Self::Validation(other.to_string()),
        }
    }
}

/// `saveCharacter` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveCharacterRequest {
    pub kind: GlyphKind,
    pub symbol: String,
    pub vector_document: String,
}

/// Archive façade; pass it explicitly to every caller that needs storage.
pub struct Archive {
    config: ArchiveConfig,
    exporter: Exporter,
    conn: Option<Connection>,
}

impl Archive {
    /// Creates an uninitialized archive. No storage is touched.
    pub fn new(config: ArchiveConfig) -> Self {
        let exporter = Exporter::new(config.export_dir.clone());
        Self {
            config,
            exporter,
            conn: None,
        }
    }

    /// Creates and initializes an archive in one step.
    pub fn open(config: ArchiveConfig) -> ArchiveResult<Self> {
        let mut archive = Self::new(config);
        archive.initialize()?;
        Ok(archive)
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.conn.is_some()
    }

    /// Opens the storage handle and applies migrations.
    ///
    /// Calling it again while initialized keeps the existing handle.
    pub fn initialize(&mut self) -> ArchiveResult<()> {
        if self.conn.is_some() {
            warn!("event=archive_init module=facade status=skipped reason=already_initialized");
            return Ok(());
        }

        let conn = match &self.config.db_path {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };
        self.conn = Some(conn);
        info!("event=archive_init module=facade status=ok");
        Ok(())
    }

    /// Releases the storage handle. Later calls fail until re-initialized.
    pub fn shutdown(&mut self) -> ArchiveResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        conn.close().map_err(|(conn, err)| {
            self.conn = Some(conn);
            error!("event=archive_shutdown module=facade status=error error={err}");
            ArchiveError::StorageUnavailable(err.to_string())
        })?;
        info!("event=archive_shutdown module=facade status=ok");
        Ok(())
    }

    /// `saveCharacter`: upserts a glyph artifact by symbol.
    pub fn save_character(&self, request: &SaveCharacterRequest) -> ArchiveResult<()> {
        observe("save_character", || {
            self.glyphs()?.save_glyph(
                request.kind,
                &request.symbol,
                request.vector_document.as_str(),
            )?;
            Ok(())
        })
    }

    /// Serializes a captured stroke and stores it; returns the document.
    pub fn save_drawn_character(
        &self,
        kind: GlyphKind,
        symbol: &str,
        polyline: &Polyline,
    ) -> ArchiveResult<String> {
        observe("save_drawn_character", || {
            Ok(self.glyphs()?.save_stroke(kind, symbol, polyline)?)
        })
    }

    /// `loadCharacters`: every glyph ordered by kind, then symbol.
    pub fn load_characters(&self) -> ArchiveResult<Vec<Glyph>> {
        observe("load_characters", || Ok(self.glyphs()?.list_glyphs()?))
    }

    pub fn alphabet_progress(&self) -> ArchiveResult<AlphabetProgress> {
        observe("alphabet_progress", || {
            Ok(self.glyphs()?.alphabet_progress()?)
        })
    }

    /// `saveWord`: adds a lexicon entry and returns it with its id.
    pub fn save_word(&self, fields: &EntryFields) -> ArchiveResult<LexiconEntry> {
        observe("save_word", || Ok(self.lexicon()?.add_entry(fields)?))
    }

    /// Fills an empty lexicon with the starter words; returns how many were
    /// inserted.
    pub fn seed_starter_lexicon(&self) -> ArchiveResult<usize> {
        observe("seed_starter_lexicon", || {
            Ok(self.lexicon()?.seed_starter_lexicon()?)
        })
    }

    /// `loadWords`: every entry ordered by headword.
    pub fn load_words(&self) -> ArchiveResult<Vec<LexiconEntry>> {
        observe("load_words", || Ok(self.lexicon()?.list_entries()?))
    }

    /// `updateWord`: replaces every mutable field of entry `id`.
    pub fn update_word(&self, id: EntryId, fields: &EntryFields) -> ArchiveResult<LexiconEntry> {
        observe("update_word", || Ok(self.lexicon()?.update_entry(id, fields)?))
    }

    /// `deleteWord`: removes entry `id` permanently.
    pub fn delete_word(&self, id: EntryId) -> ArchiveResult<()> {
        observe("delete_word", || Ok(self.lexicon()?.delete_entry(id)?))
    }

    /// Filters entries by term and category (`"all"` disables the category).
    pub fn search_words(&self, term: &str, category: &str) -> ArchiveResult<Vec<LexiconEntry>> {
        observe("search_words", || Ok(self.lexicon()?.search(term, category)?))
    }

    pub fn translate(
        &self,
        term: &str,
        source: TranslationSource,
    ) -> ArchiveResult<Option<LexiconEntry>> {
        observe("translate", || Ok(self.lexicon()?.translate(term, source)?))
    }

    pub fn list_categories(&self) -> ArchiveResult<Vec<String>> {
        observe("list_categories", || Ok(self.lexicon()?.list_categories()?))
    }

    pub fn add_grammar_note(
        &self,
        title: &str,
        content: &str,
        category: Option<&str>,
    ) -> ArchiveResult<GrammarNote> {
        observe("add_grammar_note", || {
            Ok(self.grammar()?.add_note(title, content, category)?)
        })
    }

    /// Grammar notes in creation order.
    pub fn list_grammar_notes(&self) -> ArchiveResult<Vec<GrammarNote>> {
        observe("list_grammar_notes", || Ok(self.grammar()?.list_notes()?))
    }

    pub fn list_grammar_notes_in_category(&self, category: &str) -> ArchiveResult<Vec<GrammarNote>> {
        observe("list_grammar_notes_in_category", || {
            Ok(self.grammar()?.list_notes_in_category(category)?)
        })
    }

    /// `exportToJSON`: writes any serializable payload.
    pub fn export_to_json<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        payload: &T,
    ) -> ArchiveResult<PathBuf> {
        observe("export_to_json", || {
            Ok(self.exporter.export_json(file_name, payload)?)
        })
    }

    /// `exportToSVG`: writes one glyph document.
    pub fn export_to_svg(&self, vector_document: &str, file_name: &str) -> ArchiveResult<PathBuf> {
        observe("export_to_svg", || {
            Ok(self.exporter.export_svg(vector_document, file_name)?)
        })
    }

    /// `exportToPDF`: writes a text report of any serializable payload.
    pub fn export_to_pdf<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        payload: &T,
    ) -> ArchiveResult<PathBuf> {
        observe("export_to_pdf", || {
            Ok(self.exporter.export_pdf(file_name, payload)?)
        })
    }

    fn conn(&self) -> ArchiveResult<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            ArchiveError::StorageUnavailable("archive is not initialized".to_string())
        })
    }

    fn glyphs(&self) -> ArchiveResult<GlyphService<SqliteGlyphRepository<'_>>> {
        let repo = SqliteGlyphRepository::try_new(self.conn()?)?;
        Ok(GlyphService::new(repo, self.config.canvas))
    }

    fn lexicon(&self) -> ArchiveResult<LexiconService<SqliteLexiconRepository<'_>>> {
        let repo = SqliteLexiconRepository::try_new(self.conn()?)?;
        Ok(LexiconService::new(repo, self.config.entry_defaults.clone()))
    }

    fn grammar(&self) -> ArchiveResult<GrammarService<SqliteGrammarNoteRepository<'_>>> {
        let repo = SqliteGrammarNoteRepository::try_new(self.conn()?)?;
        Ok(GrammarService::new(repo))
    }
}

fn observe<T>(event: &'static str, op: impl FnOnce() -> ArchiveResult<T>) -> ArchiveResult<T> {
    let started_at = Instant::now();
    let result = op();
    match &result {
        Ok(_) => info!(
            "event={} module=facade status=ok duration_ms={}",
            event,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event={} module=facade status=error duration_ms={} error_code={}",
            event,
            started_at.elapsed().as_millis(),
            err.code()
        ),
    }
    result
}
