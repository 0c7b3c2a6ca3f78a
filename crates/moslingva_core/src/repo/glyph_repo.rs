//! Glyph repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist glyph artifacts keyed by `symbol`.
//! - Return the whole glyph set in display order.
//!
//! # Invariants
//! - At most one row per `symbol`, enforced by the `UNIQUE` column.
//! - Upsert is a single statement; repeating it with identical input leaves
//!   the row untouched, including `updated_at`.
//! - Listing is ordered by `kind, symbol` ascending.

use crate::model::glyph::{Glyph, GlyphDraft, GlyphKind};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const GLYPH_SELECT_SQL: &str = "SELECT
    kind,
    symbol,
    vector_document,
    created_at,
    updated_at
FROM glyphs";

/// Repository interface for glyph artifacts.
pub trait GlyphRepository {
    /// Inserts the glyph, or replaces kind and document for an existing symbol.
    fn upsert_glyph(&self, draft: &GlyphDraft) -> RepoResult<()>;
    fn get_glyph(&self, symbol: &str) -> RepoResult<Option<Glyph>>;
    fn list_glyphs(&self) -> RepoResult<Vec<Glyph>>;
}

/// SQLite-backed glyph repository.
pub struct SqliteGlyphRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGlyphRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["glyphs"])?;
        Ok(Self { conn })
    }
}

impl GlyphRepository for SqliteGlyphRepository<'_> {
    fn upsert_glyph(&self, draft: &GlyphDraft) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO glyphs (kind, symbol, vector_document)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(symbol) DO UPDATE SET
                kind = excluded.kind,
                vector_document = excluded.vector_document,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE glyphs.kind <> excluded.kind
                OR glyphs.vector_document <> excluded.vector_document;",
            params![
                draft.kind.as_str(),
                draft.symbol.as_str(),
                draft.vector_document.as_str(),
            ],
        )?;
        Ok(())
    }

    fn get_glyph(&self, symbol: &str) -> RepoResult<Option<Glyph>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GLYPH_SELECT_SQL} WHERE symbol = ?1;"))?;
        let mut rows = stmt.query([symbol.trim()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_glyph_row(row)?));
        }
        Ok(None)
    }

    fn list_glyphs(&self) -> RepoResult<Vec<Glyph>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GLYPH_SELECT_SQL} ORDER BY kind ASC, symbol ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut glyphs = Vec::new();
        while let Some(row) = rows.next()? {
            glyphs.push(parse_glyph_row(row)?);
        }
        Ok(glyphs)
    }
}

fn parse_glyph_row(row: &Row<'_>) -> RepoResult<Glyph> {
    let kind_text: String = row.get("kind")?;
    let kind = kind_text.parse::<GlyphKind>().map_err(|_| {
        RepoError::InvalidData(format!("invalid glyph kind `{kind_text}` in glyphs.kind"))
    })?;

    Ok(Glyph {
        kind,
        symbol: row.get("symbol")?,
        vector_document: row.get("vector_document")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
