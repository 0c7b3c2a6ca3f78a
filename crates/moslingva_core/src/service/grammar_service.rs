//! Grammar note service: validated append plus creation-ordered reads.

use crate::model::grammar::{GrammarNote, NoteDraft};
use crate::repo::grammar_repo::GrammarNoteRepository;
use crate::repo::{RepoError, RepoResult};

pub struct GrammarService<R: GrammarNoteRepository> {
    repo: R,
}

impl<R: GrammarNoteRepository> GrammarService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Appends a note and returns it as stored.
    pub fn add_note(
        &self,
        title: &str,
        content: &str,
        category: Option<&str>,
    ) -> RepoResult<GrammarNote> {
        let draft = NoteDraft::new(title, content, category)?;
        let id = self.repo.add_note(&draft)?;
        self.repo.get_note(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("grammar note {id} missing after insert"))
        })
    }

    pub fn list_notes(&self) -> RepoResult<Vec<GrammarNote>> {
        self.repo.list_notes()
    }

    pub fn list_notes_in_category(&self, category: &str) -> RepoResult<Vec<GrammarNote>> {
        self.repo.list_notes_in_category(category)
    }
}
