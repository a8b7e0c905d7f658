//! The `nettakip add` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, Utc};

use nettakip_core::model::{StudyEntry, Subject};
use nettakip_core::scoring::entry_net;
use nettakip_core::state::AppState;

use crate::actions;

/// Upper bound on a single session; a form-level sanity check only.
const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// Upper bound per answer count, likewise a sanity check.
const MAX_ANSWER_COUNT: u32 = 10_000;

pub async fn execute(
    config_path: Option<PathBuf>,
    subject: String,
    topic: String,
    correct: u32,
    incorrect: u32,
    duration: u32,
    date: Option<String>,
) -> Result<()> {
    // Validate inputs before touching config or network
    let subject: Subject = subject
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    anyhow::ensure!(!topic.trim().is_empty(), "topic must not be empty");
    anyhow::ensure!(
        correct <= MAX_ANSWER_COUNT && incorrect <= MAX_ANSWER_COUNT,
        "answer counts must be at most {MAX_ANSWER_COUNT}"
    );
    anyhow::ensure!(
        correct + incorrect > 0,
        "at least one question must be answered"
    );
    anyhow::ensure!(
        (1..=MAX_DURATION_MINUTES).contains(&duration),
        "duration must be between 1 and {MAX_DURATION_MINUTES} minutes"
    );

    let date = match date {
        Some(s) => {
            let day: NaiveDate = s
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid date '{s}', expected YYYY-MM-DD"))?;
            day.and_hms_opt(12, 0, 0)
                .expect("valid time of day")
                .and_utc()
        }
        None => Utc::now(),
    };

    let entry = StudyEntry::new(date, subject, topic.trim(), correct, incorrect, duration);
    let net = entry_net(&entry);

    let (_config, store) = super::open_store(config_path.as_ref())?;
    let mut state = AppState::new();
    actions::add_entry(&mut state, &store, entry.clone()).await?;

    println!(
        "Saved: {} ({}) — {} Doğru, {} Yanlış, {:.2} Net, {} dk [{}]",
        entry.subject, entry.topic, entry.correct_count, entry.incorrect_count, net,
        entry.duration_minutes, entry.id
    );
    Ok(())
}
