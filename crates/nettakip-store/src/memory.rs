//! In-memory record store for tests and offline use.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use nettakip_core::error::StoreError;
use nettakip_core::model::{DenemeEntry, StudyEntry};
use nettakip_core::traits::RecordStore;

/// A `RecordStore` held entirely in memory.
///
/// Lists are kept newest-first like the remote store. A single failure can be
/// injected to exercise rollback paths; it is consumed by the next operation.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<StudyEntry>>,
    exams: Mutex<Vec<DenemeEntry>>,
    call_count: AtomicU32,
    fail_next: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<StudyEntry>) -> Self {
        let store = Self::new();
        *store.entries.lock().unwrap() = entries;
        store
    }

    /// Make the next operation fail with a 500-style error.
    pub fn fail_next(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(message.to_string());
    }

    /// Number of operations performed (including the failed one).
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Some(message) = self.fail_next.lock().unwrap().take() {
            return Err(StoreError::ApiError {
                status: 500,
                message,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_entry(&self, entry: &StudyEntry) -> Result<StudyEntry, StoreError> {
        self.check_failure()?;
        let mut entries = self.entries.lock().unwrap();
        let index = entries
            .iter()
            .position(|e| e.date <= entry.date)
            .unwrap_or(entries.len());
        entries.insert(index, entry.clone());
        Ok(entry.clone())
    }

    async fn list_entries(&self) -> Result<Vec<StudyEntry>, StoreError> {
        self.check_failure()?;
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn delete_entry(&self, id: Uuid) -> Result<(), StoreError> {
        self.check_failure()?;
        // Unknown ids are a successful no-op, as with PostgREST.
        self.entries.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn insert_exam(&self, exam: &DenemeEntry) -> Result<DenemeEntry, StoreError> {
        self.check_failure()?;
        let mut exams = self.exams.lock().unwrap();
        let index = exams
            .iter()
            .position(|e| e.created_at <= exam.created_at)
            .unwrap_or(exams.len());
        exams.insert(index, exam.clone());
        Ok(exam.clone())
    }

    async fn list_exams(&self) -> Result<Vec<DenemeEntry>, StoreError> {
        self.check_failure()?;
        Ok(self.exams.lock().unwrap().clone())
    }

    async fn delete_exam(&self, id: Uuid) -> Result<(), StoreError> {
        self.check_failure()?;
        self.exams.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}
