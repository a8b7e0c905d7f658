//! The `nettakip deneme` commands — the mock-exam tracker tab.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Table};
use uuid::Uuid;

use nettakip_core::model::{DenemeEntry, ExamType, SubjectScore};
use nettakip_core::scoring::section_net;
use nettakip_core::state::AppState;
use nettakip_core::traits::RecordStore;

use crate::actions;

#[derive(Subcommand)]
pub enum DenemeCommands {
    /// Save a mock-exam result
    Add {
        /// Exam format: tyt or ayt
        #[arg(long)]
        exam_type: String,

        /// Section score as key=correct/incorrect (repeatable),
        /// e.g. --score turkce=35/4
        #[arg(long = "score", required = true)]
        scores: Vec<String>,
    },

    /// List saved mock exams
    List,

    /// Delete a mock exam by id
    Delete {
        id: Uuid,
    },
}

pub async fn execute(config_path: Option<PathBuf>, command: DenemeCommands) -> Result<()> {
    match command {
        DenemeCommands::Add { exam_type, scores } => add(config_path, exam_type, scores).await,
        DenemeCommands::List => list(config_path).await,
        DenemeCommands::Delete { id } => delete(config_path, id).await,
    }
}

/// Parse one `key=correct/incorrect` section score argument.
fn parse_score(spec: &str) -> Result<(String, SubjectScore)> {
    let (key, counts) = spec
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid score '{spec}', expected key=correct/incorrect"))?;
    let (correct, incorrect) = counts
        .split_once('/')
        .ok_or_else(|| anyhow::anyhow!("invalid score '{spec}', expected key=correct/incorrect"))?;
    let correct: u32 = correct
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid correct count in '{spec}'"))?;
    let incorrect: u32 = incorrect
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid incorrect count in '{spec}'"))?;
    Ok((key.trim().to_string(), SubjectScore { correct, incorrect }))
}

async fn add(config_path: Option<PathBuf>, exam_type: String, specs: Vec<String>) -> Result<()> {
    let exam_type: ExamType = exam_type.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let mut scores = BTreeMap::new();
    for spec in &specs {
        let (key, score) = parse_score(spec)?;
        scores.insert(key, score);
    }

    let exam = DenemeEntry::new(exam_type, scores);
    exam.validate_scores().map_err(|e| anyhow::anyhow!(e))?;

    let (_config, store) = super::open_store(config_path.as_ref())?;
    let mut state = AppState::new();
    actions::add_exam(&mut state, &store, exam.clone()).await?;

    let mut table = Table::new();
    table.set_header(vec!["Section", "D", "Y", "Net"]);
    for (key, score) in &exam.scores {
        let label = exam_type.section(key).map(|s| s.label).unwrap_or(key);
        table.add_row(vec![
            Cell::new(label),
            Cell::new(score.correct),
            Cell::new(score.incorrect),
            Cell::new(format!("{:.2}", section_net(score))),
        ]);
    }
    println!("{table}");
    println!(
        "Saved {} deneme: {:.2} total net [{}]",
        exam.exam_type, exam.total_net, exam.id
    );
    Ok(())
}

async fn list(config_path: Option<PathBuf>) -> Result<()> {
    let (_config, store) = super::open_store(config_path.as_ref())?;
    let mut state = AppState::new();
    state.refresh_exams(store.list_exams().await?);

    if state.exams().is_empty() {
        println!("No mock exams saved yet. Add one with `nettakip deneme add`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Type", "Sections", "Total Net", "Id"]);
    for exam in state.exams() {
        table.add_row(vec![
            Cell::new(exam.created_at.format("%d.%m.%Y")),
            Cell::new(exam.exam_type),
            Cell::new(format!(
                "{} / {}",
                exam.scores.len(),
                exam.exam_type.sections().len()
            )),
            Cell::new(format!("{:.2}", exam.total_net)),
            Cell::new(exam.id),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn delete(config_path: Option<PathBuf>, id: Uuid) -> Result<()> {
    let (_config, store) = super::open_store(config_path.as_ref())?;
    let mut state = AppState::new();
    state.refresh_exams(store.list_exams().await?);

    let known = state.exams().iter().any(|e| e.id == id);
    actions::delete_exam(&mut state, &store, id).await?;

    if known {
        println!("Deleted deneme {id}");
    } else {
        println!("No deneme with id {id}; nothing removed locally.");
    }
    Ok(())
}
