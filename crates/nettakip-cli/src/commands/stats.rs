//! The `nettakip stats` command — the dashboard overview tab.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use comfy_table::{Cell, Table};

use nettakip_core::scoring::entries_net;
use nettakip_core::stats::{
    daily_summary, exam_countdown, subject_breakdown, weekly_activity,
};
use nettakip_core::traits::RecordStore;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (config, store) = super::open_store(config_path.as_ref())?;
    let entries = store.list_entries().await?;

    let now = Utc::now();
    let today = now.date_naive();

    match exam_countdown(now, config.exam_date) {
        Some(c) => println!(
            "YKS countdown: {} days {:02}:{:02}:{:02}\n",
            c.days, c.hours, c.minutes, c.seconds
        ),
        None => println!("The exam date has passed. Good luck!\n"),
    }

    let daily = daily_summary(&entries, today);
    let mut cards = Table::new();
    cards.set_header(vec!["Günlük Soru", "Günlük Net", "Çalışma Süresi", "Toplam Net"]);
    cards.add_row(vec![
        Cell::new(daily.total_questions),
        Cell::new(format!("{:.2}", daily.total_net)),
        Cell::new(format!("{} dk", daily.total_minutes)),
        Cell::new(format!("{:.2}", entries_net(&entries))),
    ]);
    println!("{cards}");

    let breakdown = subject_breakdown(&entries, today);
    if !breakdown.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Subject", "Questions today"]);
        for (subject, questions) in breakdown {
            table.add_row(vec![Cell::new(subject), Cell::new(questions)]);
        }
        println!("\n{table}");
    }

    let mut week = Table::new();
    week.set_header(vec!["Day", "Questions", "Net", "Minutes"]);
    for day in weekly_activity(&entries, today) {
        week.add_row(vec![
            Cell::new(day.day.format("%d.%m")),
            Cell::new(day.total_questions),
            Cell::new(format!("{:.2}", day.total_net)),
            Cell::new(day.total_minutes),
        ]);
    }
    println!("\n{week}");

    Ok(())
}
