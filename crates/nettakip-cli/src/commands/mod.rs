pub mod add;
pub mod coach;
pub mod deneme;
pub mod init;
pub mod log;
pub mod pomodoro;
pub mod stats;

use std::path::PathBuf;

use anyhow::Result;

use nettakip_core::config::{load_config_from, NettakipConfig};
use nettakip_store::SupabaseStore;

/// Load the config and build the record store from it.
pub(crate) fn open_store(config_path: Option<&PathBuf>) -> Result<(NettakipConfig, SupabaseStore)> {
    let config = load_config_from(config_path.map(|p| p.as_path()))?;
    let store = SupabaseStore::from_config(&config.supabase);
    Ok((config, store))
}
