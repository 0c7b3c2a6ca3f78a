//! Lexicon repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `lexicon_entries`.
//! - Keep the headword ordering contract in one place.
//!
//! # Invariants
//! - Ids come from `AUTOINCREMENT` and are never reused after delete.
//! - Listing order is `headword` (BINARY collation, case-sensitive), then `id`.
//! - Update/delete of an unknown id is `RepoError::NotFound`.
//! - Seeding writes all rows or none, and never touches a non-empty lexicon.

use crate::model::lexicon::{EntryId, LexiconEntry, ResolvedEntry};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    headword,
    translation1,
    translation2,
    phonetic,
    category,
    created_at,
    updated_at
FROM lexicon_entries";

const ENTRY_ORDER_SQL: &str = "ORDER BY headword COLLATE BINARY ASC, id ASC";

/// Repository interface for lexicon entries.
pub trait LexiconRepository {
    fn add_entry(&self, entry: &ResolvedEntry) -> RepoResult<EntryId>;
    /// Inserts `entries` in one transaction only when the lexicon is empty.
    ///
    /// Returns the number of inserted rows; `0` when entries already exist.
    fn seed_entries(&self, entries: &[ResolvedEntry]) -> RepoResult<usize>;
    /// Replaces every mutable field of an existing entry.
    fn update_entry(&self, id: EntryId, entry: &ResolvedEntry) -> RepoResult<()>;
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<LexiconEntry>>;
    fn list_entries(&self) -> RepoResult<Vec<LexiconEntry>>;
    /// Distinct categories, sorted ascending.
    fn list_categories(&self) -> RepoResult<Vec<String>>;
}

/// SQLite-backed lexicon repository.
pub struct SqliteLexiconRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLexiconRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["lexicon_entries"])?;
        Ok(Self { conn })
    }
}

impl LexiconRepository for SqliteLexiconRepository<'_> {
    fn add_entry(&self, entry: &ResolvedEntry) -> RepoResult<EntryId> {
        insert_entry(self.conn, entry)
    }

    fn seed_entries(&self, entries: &[ResolvedEntry]) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let existing: i64 =
            tx.query_row("SELECT COUNT(*) FROM lexicon_entries;", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }
        for entry in entries {
            insert_entry(&tx, entry)?;
        }
        tx.commit()?;
        Ok(entries.len())
    }

    fn update_entry(&self, id: EntryId, entry: &ResolvedEntry) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE lexicon_entries
             SET
                headword = ?1,
                translation1 = ?2,
                translation2 = ?3,
                phonetic = ?4,
                category = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?6;",
            params![
                entry.headword.as_str(),
                entry.translation1.as_str(),
                entry.translation2.as_str(),
                entry.phonetic.as_str(),
                entry.category.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM lexicon_entries WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<LexiconEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }
        Ok(None)
    }

    fn list_entries(&self) -> RepoResult<Vec<LexiconEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} {ENTRY_ORDER_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }
        Ok(entries)
    }

    fn list_categories(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT category
             FROM lexicon_entries
             ORDER BY category COLLATE BINARY ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(row.get(0)?);
        }
        Ok(categories)
    }
}

fn insert_entry(conn: &Connection, entry: &ResolvedEntry) -> RepoResult<EntryId> {
    conn.execute(
        "INSERT INTO lexicon_entries (
            headword,
            translation1,
            translation2,
            phonetic,
            category
        ) VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            entry.headword.as_str(),
            entry.translation1.as_str(),
            entry.translation2.as_str(),
            entry.phonetic.as_str(),
            entry.category.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<LexiconEntry> {
    let entry = LexiconEntry {
        id: row.get("id")?,
        headword: row.get("headword")?,
        translation1: row.get("translation1")?,
        translation2: row.get("translation2")?,
        phonetic: row.get("phonetic")?,
        category: row.get("category")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };

    if entry.headword.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty headword in lexicon_entries row {}",
            entry.id
        )));
    }
    Ok(entry)
}
