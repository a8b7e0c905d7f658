//! Two-phase optimistic mutations against the record store.
//!
//! Each action applies the local state change first, captures its inverse,
//! issues the remote operation, and reverts with the captured inverse when
//! the remote call fails. Failures are surfaced to the caller; nothing is
//! retried.

use anyhow::{Context, Result};
use uuid::Uuid;

use nettakip_core::model::{DenemeEntry, StudyEntry};
use nettakip_core::state::AppState;
use nettakip_core::traits::RecordStore;

pub async fn add_entry(
    state: &mut AppState,
    store: &dyn RecordStore,
    entry: StudyEntry,
) -> Result<()> {
    let rollback = state.apply_add_entry(entry.clone());
    if let Err(e) = store.insert_entry(&entry).await {
        state.revert(rollback);
        return Err(e).context("failed to save the study entry");
    }
    Ok(())
}

pub async fn delete_entry(state: &mut AppState, store: &dyn RecordStore, id: Uuid) -> Result<()> {
    let rollback = state.apply_delete_entry(id);
    if let Err(e) = store.delete_entry(id).await {
        state.revert(rollback);
        return Err(e).context("failed to delete the study entry");
    }
    Ok(())
}

pub async fn add_exam(
    state: &mut AppState,
    store: &dyn RecordStore,
    exam: DenemeEntry,
) -> Result<()> {
    let rollback = state.apply_add_exam(exam.clone());
    if let Err(e) = store.insert_exam(&exam).await {
        state.revert(rollback);
        return Err(e).context("failed to save the exam result");
    }
    Ok(())
}

pub async fn delete_exam(state: &mut AppState, store: &dyn RecordStore, id: Uuid) -> Result<()> {
    let rollback = state.apply_delete_exam(id);
    if let Err(e) = store.delete_exam(id).await {
        state.revert(rollback);
        return Err(e).context("failed to delete the exam result");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nettakip_core::model::Subject;
    use nettakip_store::MemoryStore;

    fn entry() -> StudyEntry {
        StudyEntry::new(Utc::now(), Subject::Tarih, "Osmanlı", 14, 6, 35)
    }

    #[tokio::test]
    async fn successful_add_keeps_optimistic_state() {
        let store = MemoryStore::new();
        let mut state = AppState::new();

        add_entry(&mut state, &store, entry()).await.unwrap();
        assert_eq!(state.entries().len(), 1);
        assert_eq!(store.list_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_add_reverts_optimistic_state() {
        let store = MemoryStore::new();
        store.fail_next("down");
        let mut state = AppState::new();

        let err = add_entry(&mut state, &store, entry()).await.unwrap_err();
        assert!(err.to_string().contains("failed to save"));
        assert!(state.entries().is_empty());
    }

    #[tokio::test]
    async fn failed_delete_restores_the_entry() {
        let store = MemoryStore::new();
        let entry = entry();
        let mut state = AppState::new();
        add_entry(&mut state, &store, entry.clone()).await.unwrap();

        store.fail_next("down");
        let result = delete_entry(&mut state, &store, entry.id).await;
        assert!(result.is_err());
        assert_eq!(state.entries().len(), 1);
        assert_eq!(state.entries()[0].id, entry.id);
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_state_unchanged() {
        let store = MemoryStore::new();
        let mut state = AppState::new();
        add_entry(&mut state, &store, entry()).await.unwrap();

        delete_entry(&mut state, &store, Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(state.entries().len(), 1);
    }
}
