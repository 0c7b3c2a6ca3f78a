//! Versioned schema for the archive database.
//!
//! | version | name            | creates                                   |
//! |---------|-----------------|-------------------------------------------|
//! | 1       | `glyph_lexicon` | `glyphs`, `lexicon_entries`, headword index |
//! | 2       | `grammar_notes` | `grammar_notes`                           |
//!
//! # Invariants
//! - `PRAGMA user_version` equals the last applied entry of [`SCHEMA`].
//! - Every pending step runs in one transaction; a failed step leaves the
//!   version untouched.
//! - Steps are additive. Glyph, lexicon and note rows are never rewritten.
//! - A database newer than [`latest_version`] is refused, not downgraded.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "glyph_lexicon",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "grammar_notes",
        sql: include_str!("0002_grammar_notes.sql"),
    },
];

/// Highest schema version this build understands.
pub fn latest_version() -> u32 {
    SCHEMA.last().map_or(0, |step| step.version)
}

/// Brings the archive schema up to [`latest_version`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending = SCHEMA
        .iter()
        .filter(|step| step.version > from_version)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={latest}"
    );
    Ok(())
}

/// Schema version recorded in the archive file.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
