//! Core trait definitions for the record store and the coach model.
//!
//! These async traits are implemented by the `nettakip-store` and
//! `nettakip-coach` crates respectively.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{CoachError, StoreError};
use crate::model::{DenemeEntry, StudyEntry};

/// The remote record store: three operations per record type.
///
/// Inserts return the stored row; lists come back newest-first; deleting an
/// id that does not exist is a successful no-op.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_entry(&self, entry: &StudyEntry) -> Result<StudyEntry, StoreError>;
    async fn list_entries(&self) -> Result<Vec<StudyEntry>, StoreError>;
    async fn delete_entry(&self, id: Uuid) -> Result<(), StoreError>;

    async fn insert_exam(&self, exam: &DenemeEntry) -> Result<DenemeEntry, StoreError>;
    async fn list_exams(&self) -> Result<Vec<DenemeEntry>, StoreError>;
    async fn delete_exam(&self, id: Uuid) -> Result<(), StoreError>;
}

/// An external text-generation model.
///
/// Takes a plain-text prompt, returns opaque Markdown text. No parsing,
/// validation, or retries happen behind this trait.
#[async_trait]
pub trait AdviceModel: Send + Sync {
    /// Human-readable model backend name (e.g. "gemini").
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, CoachError>;
}

#[async_trait]
impl<T: AdviceModel + ?Sized> AdviceModel for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn generate(&self, prompt: &str) -> Result<String, CoachError> {
        (**self).generate(prompt).await
    }
}
