//! Application configuration.
//!
//! Loaded from `nettakip.toml` in the current directory or
//! `~/.config/nettakip/config.toml`, with `${VAR}` interpolation and
//! `NETTAKIP_*` environment overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pomodoro::PomodoroSettings;

/// Record-store connection settings.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure
/// in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL (e.g. "https://xyz.supabase.co").
    pub url: String,
    /// The anon API key.
    pub api_key: String,
    /// Table holding study entries.
    #[serde(default = "default_study_table")]
    pub study_table: String,
    /// Table holding mock-exam results.
    #[serde(default = "default_deneme_table")]
    pub deneme_table: String,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("api_key", &"***")
            .field("study_table", &self.study_table)
            .field("deneme_table", &self.deneme_table)
            .finish()
    }
}

fn default_study_table() -> String {
    "study_sessions".to_string()
}
fn default_deneme_table() -> String {
    "deneme_results".to_string()
}

/// Coach model settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for the generative language endpoint.
    pub api_key: String,
    /// Model identifier.
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Endpoint override, mainly for tests.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

/// Top-level nettakip configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NettakipConfig {
    pub supabase: SupabaseConfig,
    /// Optional: the coach commands refuse to run without it.
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
    /// Default Pomodoro durations.
    #[serde(default)]
    pub pomodoro: PomodoroSettings,
    /// The exam instant for the countdown banner.
    #[serde(default = "default_exam_date")]
    pub exam_date: DateTime<Utc>,
}

fn default_exam_date() -> DateTime<Utc> {
    // 2026-06-20 10:00 Istanbul time.
    "2026-06-20T10:00:00+03:00"
        .parse::<DateTime<Utc>>()
        .expect("valid default exam date")
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `nettakip.toml` in the current directory
/// 2. `~/.config/nettakip/config.toml`
///
/// Environment overrides: `NETTAKIP_SUPABASE_URL`, `NETTAKIP_SUPABASE_KEY`,
/// `NETTAKIP_GEMINI_KEY`.
pub fn load_config() -> Result<NettakipConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<NettakipConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("nettakip.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<NettakipConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => anyhow::bail!(
            "no configuration found. Run `nettakip init` to create nettakip.toml"
        ),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("NETTAKIP_SUPABASE_URL") {
        config.supabase.url = url;
    }
    if let Ok(key) = std::env::var("NETTAKIP_SUPABASE_KEY") {
        config.supabase.api_key = key;
    }
    if let Ok(key) = std::env::var("NETTAKIP_GEMINI_KEY") {
        match &mut config.gemini {
            Some(gemini) => gemini.api_key = key,
            None => {
                config.gemini = Some(GeminiConfig {
                    api_key: key,
                    model: default_gemini_model(),
                    base_url: None,
                });
            }
        }
    }

    // Resolve ${VAR} references
    config.supabase.url = resolve_env_vars(&config.supabase.url);
    config.supabase.api_key = resolve_env_vars(&config.supabase.api_key);
    if let Some(gemini) = &mut config.gemini {
        gemini.api_key = resolve_env_vars(&gemini.api_key);
    }

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("nettakip"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // The NETTAKIP_* overrides are process-global; tests touching or
    // observing them run one at a time.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_NETTAKIP_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_NETTAKIP_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_NETTAKIP_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_NETTAKIP_TEST_VAR");
    }

    #[test]
    fn parse_minimal_config_applies_defaults() {
        let toml_str = r#"
[supabase]
url = "https://example.supabase.co"
api_key = "anon-key"
"#;
        let config: NettakipConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.supabase.study_table, "study_sessions");
        assert_eq!(config.supabase.deneme_table, "deneme_results");
        assert!(config.gemini.is_none());
        assert_eq!(config.pomodoro.focus_minutes, 25);
        assert_eq!(config.pomodoro.break_minutes, 5);
        // 10:00 +03:00 is 07:00 UTC.
        assert_eq!(config.exam_date, default_exam_date());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
exam_date = "2027-06-19T10:00:00+03:00"

[supabase]
url = "https://example.supabase.co"
api_key = "anon-key"
study_table = "sessions"

[gemini]
api_key = "g-key"
model = "gemini-2.0-pro"

[pomodoro]
focus_minutes = 50
break_minutes = 10
"#;
        let config: NettakipConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.supabase.study_table, "sessions");
        assert_eq!(config.gemini.as_ref().unwrap().model, "gemini-2.0-pro");
        assert_eq!(config.pomodoro.focus_minutes, 50);
        assert_eq!(config.exam_date.to_rfc3339(), "2027-06-19T07:00:00+00:00");
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn load_from_explicit_path() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nettakip.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[supabase]").unwrap();
        writeln!(file, "url = \"https://example.supabase.co\"").unwrap();
        writeln!(file, "api_key = \"k\"").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.supabase.url, "https://example.supabase.co");
    }

    #[test]
    fn env_overrides_beat_file_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nettakip.toml");
        std::fs::write(
            &path,
            "[supabase]\nurl = \"https://file.supabase.co\"\napi_key = \"file-key\"\n",
        )
        .unwrap();

        std::env::set_var("NETTAKIP_SUPABASE_URL", "https://env.supabase.co");
        std::env::set_var("NETTAKIP_SUPABASE_KEY", "env-key");
        std::env::set_var("NETTAKIP_GEMINI_KEY", "env-gemini");

        let config = load_config_from(Some(&path)).unwrap();

        std::env::remove_var("NETTAKIP_SUPABASE_URL");
        std::env::remove_var("NETTAKIP_SUPABASE_KEY");
        std::env::remove_var("NETTAKIP_GEMINI_KEY");

        assert_eq!(config.supabase.url, "https://env.supabase.co");
        assert_eq!(config.supabase.api_key, "env-key");
        // No [gemini] section in the file; the env key creates one with the
        // default model.
        let gemini = config.gemini.unwrap();
        assert_eq!(gemini.api_key, "env-gemini");
        assert_eq!(gemini.model, "gemini-2.0-flash");
    }

    #[test]
    fn debug_masks_keys() {
        let config = SupabaseConfig {
            url: "https://example.supabase.co".into(),
            api_key: "secret".into(),
            study_table: default_study_table(),
            deneme_table: default_deneme_table(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("***"));
    }
}
