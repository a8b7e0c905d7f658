//! nettakip CLI — the user-facing dashboard.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod actions;
mod commands;

#[derive(Parser)]
#[command(name = "nettakip", version, about = "YKS study-tracking dashboard")]
struct Cli {
    /// Config file path (default: nettakip.toml, then ~/.config/nettakip/)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a study session
    Add {
        /// Subject studied (e.g. "matematik", "fizik")
        #[arg(long)]
        subject: String,

        /// Topic within the subject
        #[arg(long)]
        topic: String,

        /// Correct answer count
        #[arg(long)]
        correct: u32,

        /// Incorrect answer count
        #[arg(long)]
        incorrect: u32,

        /// Session length in minutes
        #[arg(long)]
        duration: u32,

        /// Session date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the activity log
    Log,

    /// Delete a study entry by id
    Delete {
        id: uuid::Uuid,
    },

    /// Show the stats overview and exam countdown
    Stats,

    /// Track mock-exam ("deneme") results
    Deneme {
        #[command(subcommand)]
        command: commands::deneme::DenemeCommands,
    },

    /// Ask the AI coach
    Coach {
        #[command(subcommand)]
        command: commands::coach::CoachCommands,
    },

    /// Run the Pomodoro focus timer
    Pomodoro {
        /// Focus phase length in minutes
        #[arg(long)]
        focus: Option<u32>,

        /// Break phase length in minutes
        #[arg(long)]
        break_minutes: Option<u32>,

        /// Exit after this many completed focus phases (0 = run until interrupted)
        #[arg(long, default_value = "1")]
        sessions: u32,

        /// Log each completed focus phase as a study entry
        #[arg(long)]
        log_sessions: bool,

        /// Subject for logged sessions
        #[arg(long, default_value = "matematik")]
        subject: String,

        /// Topic for logged sessions
        #[arg(long, default_value = "Pomodoro")]
        topic: String,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nettakip=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Add {
            subject,
            topic,
            correct,
            incorrect,
            duration,
            date,
        } => commands::add::execute(config, subject, topic, correct, incorrect, duration, date)
            .await,
        Commands::Log => commands::log::execute(config).await,
        Commands::Delete { id } => commands::log::delete(config, id).await,
        Commands::Stats => commands::stats::execute(config).await,
        Commands::Deneme { command } => commands::deneme::execute(config, command).await,
        Commands::Coach { command } => commands::coach::execute(config, command).await,
        Commands::Pomodoro {
            focus,
            break_minutes,
            sessions,
            log_sessions,
            subject,
            topic,
        } => {
            commands::pomodoro::execute(
                config,
                focus,
                break_minutes,
                sessions,
                log_sessions,
                subject,
                topic,
            )
            .await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
