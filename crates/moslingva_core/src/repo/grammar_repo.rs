//! Grammar note repository. Append-only: no update or delete path exists.
//!
//! Notes are listed in creation order (`id` ascending).

use crate::model::grammar::{GrammarNote, NoteDraft};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    category,
    created_at
FROM grammar_notes";

pub trait GrammarNoteRepository {
    fn add_note(&self, draft: &NoteDraft) -> RepoResult<i64>;
    fn get_note(&self, id: i64) -> RepoResult<Option<GrammarNote>>;
    fn list_notes(&self) -> RepoResult<Vec<GrammarNote>>;
    fn list_notes_in_category(&self, category: &str) -> RepoResult<Vec<GrammarNote>>;
}

pub struct SqliteGrammarNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGrammarNoteRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["grammar_notes"])?;
        Ok(Self { conn })
    }

    fn query_notes(&self, sql: &str, category: Option<&str>) -> RepoResult<Vec<GrammarNote>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match category {
            Some(category) => stmt.query([category])?,
            None => stmt.query([])?,
        };
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }
}

impl GrammarNoteRepository for SqliteGrammarNoteRepository<'_> {
    fn add_note(&self, draft: &NoteDraft) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO grammar_notes (title, content, category) VALUES (?1, ?2, ?3);",
            params![
                draft.title.as_str(),
                draft.content.as_str(),
                draft.category.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_note(&self, id: i64) -> RepoResult<Option<GrammarNote>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn list_notes(&self) -> RepoResult<Vec<GrammarNote>> {
        self.query_notes(&format!("{NOTE_SELECT_SQL} ORDER BY id ASC;"), None)
    }

    fn list_notes_in_category(&self, category: &str) -> RepoResult<Vec<GrammarNote>> {
        self.query_notes(
            &format!("{NOTE_SELECT_SQL} WHERE category = ?1 ORDER BY id ASC;"),
            Some(category.trim()),
        )
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<GrammarNote> {
    Ok(GrammarNote {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        category: row.get("category")?,
        created_at: row.get("created_at")?,
    })
}
