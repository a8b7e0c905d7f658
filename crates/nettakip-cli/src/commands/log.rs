//! The `nettakip log` and `nettakip delete` commands.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use uuid::Uuid;

use nettakip_core::scoring::{entries_net, entry_net};
use nettakip_core::state::AppState;
use nettakip_core::traits::RecordStore;

use crate::actions;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (_config, store) = super::open_store(config_path.as_ref())?;
    let mut state = AppState::new();
    state.refresh_entries(store.list_entries().await?);

    if state.entries().is_empty() {
        println!("No study entries yet. Add one with `nettakip add`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Subject", "Topic", "D", "Y", "Net", "Min", "Id"]);
    for entry in state.entries() {
        table.add_row(vec![
            Cell::new(entry.date.format("%d.%m.%Y")),
            Cell::new(entry.subject),
            Cell::new(&entry.topic),
            Cell::new(entry.correct_count),
            Cell::new(entry.incorrect_count),
            Cell::new(format!("{:.2}", entry_net(entry))),
            Cell::new(entry.duration_minutes),
            Cell::new(entry.id),
        ]);
    }
    println!("{table}");
    println!(
        "{} entries, {:.2} total net",
        state.entries().len(),
        entries_net(state.entries())
    );
    Ok(())
}

pub async fn delete(config_path: Option<PathBuf>, id: Uuid) -> Result<()> {
    let (_config, store) = super::open_store(config_path.as_ref())?;
    let mut state = AppState::new();
    state.refresh_entries(store.list_entries().await?);

    let known = state.entries().iter().any(|e| e.id == id);
    actions::delete_entry(&mut state, &store, id).await?;

    if known {
        println!("Deleted entry {id}");
    } else {
        println!("No entry with id {id}; nothing removed locally.");
    }
    Ok(())
}
