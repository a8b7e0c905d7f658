//! Application state store with optimistic mutation and rollback.
//!
//! The locally cached entry and exam lists are mutated only through the
//! `apply_*` actions. Each action returns the precomputed inverse
//! ([`Rollback`]), captured at the moment of the mutation; the caller applies
//! the action, issues the remote operation, and on failure feeds the captured
//! inverse back through [`AppState::revert`]. The inverse is never recomputed
//! after the fact.

use uuid::Uuid;

use crate::model::{DenemeEntry, StudyEntry};

/// The inverse of one applied action.
#[derive(Debug, Clone, PartialEq)]
pub enum Rollback {
    /// The action did not change local state.
    None,
    RemoveEntry(Uuid),
    RestoreEntry { index: usize, entry: StudyEntry },
    RemoveExam(Uuid),
    RestoreExam { index: usize, exam: DenemeEntry },
}

/// The locally cached page-session copy of the remote record store.
///
/// Lists are kept newest-first, matching the store's read order.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    entries: Vec<StudyEntry>,
    exams: Vec<DenemeEntry>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[StudyEntry] {
        &self.entries
    }

    pub fn exams(&self) -> &[DenemeEntry] {
        &self.exams
    }

    /// Replace the cached entries with a freshly fetched list.
    pub fn refresh_entries(&mut self, entries: Vec<StudyEntry>) {
        self.entries = entries;
    }

    /// Replace the cached exams with a freshly fetched list.
    pub fn refresh_exams(&mut self, exams: Vec<DenemeEntry>) {
        self.exams = exams;
    }

    /// Insert an entry at its date-descending position.
    pub fn apply_add_entry(&mut self, entry: StudyEntry) -> Rollback {
        let rollback = Rollback::RemoveEntry(entry.id);
        let index = self
            .entries
            .iter()
            .position(|e| e.date <= entry.date)
            .unwrap_or(self.entries.len());
        self.entries.insert(index, entry);
        rollback
    }

    /// Remove an entry by id. Removing an absent id is a no-op and yields a
    /// no-op rollback.
    pub fn apply_delete_entry(&mut self, id: Uuid) -> Rollback {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                let entry = self.entries.remove(index);
                Rollback::RestoreEntry { index, entry }
            }
            None => Rollback::None,
        }
    }

    /// Insert an exam at its created_at-descending position.
    pub fn apply_add_exam(&mut self, exam: DenemeEntry) -> Rollback {
        let rollback = Rollback::RemoveExam(exam.id);
        let index = self
            .exams
            .iter()
            .position(|e| e.created_at <= exam.created_at)
            .unwrap_or(self.exams.len());
        self.exams.insert(index, exam);
        rollback
    }

    /// Remove an exam by id, with the same no-op semantics as entries.
    pub fn apply_delete_exam(&mut self, id: Uuid) -> Rollback {
        match self.exams.iter().position(|e| e.id == id) {
            Some(index) => {
                let exam = self.exams.remove(index);
                Rollback::RestoreExam { index, exam }
            }
            None => Rollback::None,
        }
    }

    /// Apply a captured inverse after a failed remote operation.
    pub fn revert(&mut self, rollback: Rollback) {
        match rollback {
            Rollback::None => {}
            Rollback::RemoveEntry(id) => {
                self.entries.retain(|e| e.id != id);
            }
            Rollback::RestoreEntry { index, entry } => {
                let index = index.min(self.entries.len());
                self.entries.insert(index, entry);
            }
            Rollback::RemoveExam(id) => {
                self.exams.retain(|e| e.id != id);
            }
            Rollback::RestoreExam { index, exam } => {
                let index = index.min(self.exams.len());
                self.exams.insert(index, exam);
            }
        }
    }
}
