//! The `nettakip coach` commands — AI coaching text.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use nettakip_coach::{Coach, GeminiModel};
use nettakip_core::traits::RecordStore;

#[derive(Subcommand)]
pub enum CoachCommands {
    /// Free-form study advice from the recent history
    Advice,

    /// A personalized 7-day study schedule
    Plan,

    /// A detailed per-subject performance report
    Report,
}

pub async fn execute(config_path: Option<PathBuf>, command: CoachCommands) -> Result<()> {
    let (config, store) = super::open_store(config_path.as_ref())?;
    let Some(gemini) = &config.gemini else {
        anyhow::bail!(
            "no [gemini] section in the config. Add an API key or set NETTAKIP_GEMINI_KEY"
        );
    };

    let entries = store.list_entries().await?;
    let coach = Coach::new(Box::new(GeminiModel::from_config(gemini)));

    let text = match command {
        CoachCommands::Advice => coach.study_advice(&entries).await,
        CoachCommands::Plan => coach.weekly_plan(&entries).await,
        CoachCommands::Report => coach.performance_report(&entries).await,
    };

    println!("{text}");
    Ok(())
}
