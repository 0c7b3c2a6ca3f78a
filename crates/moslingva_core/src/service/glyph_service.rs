//! Glyph use-case service.
//!
//! # Responsibility
//! - Save glyphs from either a finished SVG document or a captured stroke.
//! - Report alphabet completion against the fixed catalog.
//!
//! # Invariants
//! - Strokes are serialized with the service's configured canvas size.
//! - Validation and serialization run before any repository call.

use crate::model::glyph::{alphabet, Glyph, GlyphDraft, GlyphKind};
use crate::repo::glyph_repo::GlyphRepository;
use crate::repo::{RepoError, RepoResult};
use crate::stroke::{serialize_polyline, CanvasSize, Polyline, StrokeError};
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for glyph use-cases.
#[derive(Debug)]
pub enum GlyphServiceError {
    /// Stroke could not become a vector document.
    Stroke(StrokeError),
    /// Persistence-layer failure, including input validation.
    Repo(RepoError),
}

impl Display for GlyphServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stroke(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GlyphServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Stroke(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<StrokeError> for GlyphServiceError {
    fn from(value: StrokeError) -> Self {
        Self::Stroke(value)
    }
}

impl From<RepoError> for GlyphServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Completion summary of the glyph alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlphabetProgress {
    pub total: usize,
    pub completed: usize,
    /// Catalog symbols without a stored glyph, in editor order.
    pub missing: Vec<(GlyphKind, String)>,
}

pub struct GlyphService<R: GlyphRepository> {
    repo: R,
    canvas: CanvasSize,
}

impl<R: GlyphRepository> GlyphService<R> {
    pub fn new(repo: R, canvas: CanvasSize) -> Self {
        Self { repo, canvas }
    }

    /// Upserts an already serialized glyph document.
    pub fn save_glyph(
        &self,
        kind: GlyphKind,
        symbol: &str,
        vector_document: impl Into<String>,
    ) -> RepoResult<()> {
        let draft = GlyphDraft::new(kind, symbol, vector_document)?;
        self.repo.upsert_glyph(&draft)
    }

    /// Serializes a captured stroke and upserts it as the glyph for `symbol`.
    ///
    /// Returns the stored vector document.
    pub fn save_stroke(
        &self,
        kind: GlyphKind,
        symbol: &str,
        polyline: &Polyline,
    ) -> Result<String, GlyphServiceError> {
        let document = serialize_polyline(polyline, self.canvas)?;
        let draft = GlyphDraft::new(kind, symbol, document).map_err(RepoError::from)?;
        self.repo.upsert_glyph(&draft)?;
        Ok(draft.vector_document)
    }

    pub fn get_glyph(&self, symbol: &str) -> RepoResult<Option<Glyph>> {
        self.repo.get_glyph(symbol)
    }

    /// Lists every stored glyph ordered by kind, then symbol.
    pub fn list_glyphs(&self) -> RepoResult<Vec<Glyph>> {
        self.repo.list_glyphs()
    }

    /// Compares stored glyphs with the alphabet catalog.
    ///
    /// Stored symbols outside the catalog do not count towards completion.
    pub fn alphabet_progress(&self) -> RepoResult<AlphabetProgress> {
        let stored = self
            .repo
            .list_glyphs()?
            .into_iter()
            .map(|glyph| glyph.symbol)
            .collect::<HashSet<_>>();

        let mut total = 0;
        let mut missing = Vec::new();
        for (kind, symbol) in alphabet() {
            total += 1;
            if !stored.contains(symbol) {
                missing.push((kind, symbol.to_string()));
            }
        }

        Ok(AlphabetProgress {
            total,
            completed: total - missing.len(),
            missing,
        })
    }
}
