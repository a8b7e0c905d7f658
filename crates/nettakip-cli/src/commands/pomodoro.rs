//! The `nettakip pomodoro` command — a foreground focus timer.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;

use nettakip_core::config::load_config_from;
use nettakip_core::model::{StudyEntry, Subject};
use nettakip_core::pomodoro::{Phase, Pomodoro, TickEvent};
use nettakip_core::traits::RecordStore;
use nettakip_store::SupabaseStore;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    config_path: Option<PathBuf>,
    focus: Option<u32>,
    break_minutes: Option<u32>,
    sessions: u32,
    log_sessions: bool,
    subject: String,
    topic: String,
) -> Result<()> {
    let subject: Subject = subject.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    // The timer itself works without any config; logging completed phases
    // needs the store, so only then is a missing config an error.
    let config = match load_config_from(config_path.as_ref().map(|p| p.as_path())) {
        Ok(config) => Some(config),
        Err(e) if log_sessions => {
            return Err(e.context("--log-sessions needs a working store config"))
        }
        Err(_) => None,
    };
    let store = if log_sessions {
        config
            .as_ref()
            .map(|c| SupabaseStore::from_config(&c.supabase))
    } else {
        None
    };

    let mut settings = config
        .as_ref()
        .map(|c| c.pomodoro)
        .unwrap_or_default();
    if let Some(minutes) = focus {
        anyhow::ensure!(minutes > 0, "focus length must be at least 1 minute");
        settings.focus_minutes = minutes;
    }
    if let Some(minutes) = break_minutes {
        anyhow::ensure!(minutes > 0, "break length must be at least 1 minute");
        settings.break_minutes = minutes;
    }

    let mut timer = Pomodoro::new(settings);
    timer.start();
    println!(
        "Pomodoro started: {} min focus / {} min break. Ctrl-C to quit.",
        settings.focus_minutes, settings.break_minutes
    );
    print_phase(&timer);

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await; // the first tick fires immediately

    loop {
        interval.tick().await;
        match timer.tick() {
            Some(TickEvent::FocusCompleted { minutes }) => {
                println!("Focus phase done ({minutes} min). Session {} complete.",
                    timer.completed_sessions());
                if let Some(store) = &store {
                    let entry =
                        StudyEntry::new(Utc::now(), subject, topic.clone(), 0, 0, minutes);
                    store
                        .insert_entry(&entry)
                        .await
                        .context("failed to log the completed session")?;
                    println!("Logged as study entry {}", entry.id);
                }
                if sessions > 0 && timer.completed_sessions() >= sessions {
                    break;
                }
                print_phase(&timer);
            }
            Some(TickEvent::BreakCompleted) => {
                println!("Break over.");
                print_phase(&timer);
            }
            None => {
                // Show progress once a minute so the terminal is not silent.
                if timer.remaining_secs() % 60 == 0 {
                    print_phase(&timer);
                }
            }
        }
    }

    println!("Done: {} focus session(s) completed.", timer.completed_sessions());
    Ok(())
}

fn print_phase(timer: &Pomodoro) {
    let label = match timer.phase() {
        Phase::Focus => "Focus",
        Phase::Break => "Break",
    };
    let secs = timer.remaining_secs();
    println!("[{label}] {:02}:{:02} remaining", secs / 60, secs % 60);
}
