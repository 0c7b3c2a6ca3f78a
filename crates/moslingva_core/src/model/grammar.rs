//! Grammar note model. Notes are write-once, read-many.

use super::{optional_text, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Stored grammar reference note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarNote {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
}

/// Validated note write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

impl NoteDraft {
    /// Trims the title and category; content keeps its inner layout.
    pub fn new(title: &str, content: &str, category: Option<&str>) -> Result<Self, ValidationError> {
        let title = require_text("title", title)?;
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyField("content"));
        }
        Ok(Self {
            title,
            content: content.to_string(),
            category: optional_text(category),
        })
    }
}
