//! The `nettakip init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("nettakip.toml").exists() {
        println!("nettakip.toml already exists, skipping.");
    } else {
        std::fs::write("nettakip.toml", SAMPLE_CONFIG)?;
        println!("Created nettakip.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit nettakip.toml with your Supabase project URL and keys");
    println!("  2. Run: nettakip add --subject matematik --topic \"Problemler\" \\");
    println!("          --correct 30 --incorrect 8 --duration 60");
    println!("  3. Run: nettakip stats");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# nettakip configuration

# The exam instant shown by the countdown banner.
exam_date = "2026-06-20T10:00:00+03:00"

[supabase]
url = "https://your-project.supabase.co"
api_key = "${NETTAKIP_SUPABASE_KEY}"
study_table = "study_sessions"
deneme_table = "deneme_results"

# Optional: enables the `nettakip coach` commands.
[gemini]
api_key = "${GEMINI_API_KEY}"
model = "gemini-2.0-flash"

[pomodoro]
focus_minutes = 25
break_minutes = 5
"#;
