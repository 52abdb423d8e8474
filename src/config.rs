//! Configuration loading.
//!
//! Settings live in `<config_dir>/noteflow/config.toml`. Missing or invalid
//! entries fall back to defaults so the app always starts. API keys and the
//! backend location are normally supplied through the environment.

use crate::domain::PomodoroSettings;
use crate::sync::supabase::BackendConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_FALLBACK_API_KEY: &str = "FALLBACK_API_KEY";
pub const ENV_SUPABASE_URL: &str = "NOTEFLOW_SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "NOTEFLOW_SUPABASE_ANON_KEY";
pub const ENV_LOG: &str = "NOTEFLOW_LOG";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub music: MusicConfig,
    #[serde(default)]
    pub pomodoro: PomodoroConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: default_log_level(),
            ai: AiConfig::default(),
            supabase: SupabaseConfig::default(),
            music: MusicConfig::default(),
            pomodoro: PomodoroConfig::default(),
        }
    }
}

/// Log verbosity used when `NOTEFLOW_LOG` is unset.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Chat completion endpoints and credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiConfig {
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    #[serde(default = "default_primary_model")]
    pub primary_model: String,
    #[serde(default = "default_secondary_model")]
    pub secondary_model: String,
    #[serde(default = "default_last_resort_model")]
    pub last_resort_model: String,
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_site_name")]
    pub site_name: String,
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_api_key: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            base_url: default_ai_base_url(),
            primary_model: default_primary_model(),
            secondary_model: default_secondary_model(),
            last_resort_model: default_last_resort_model(),
            site_url: default_site_url(),
            site_name: default_site_name(),
            timeout_secs: default_ai_timeout(),
            api_key: None,
            fallback_api_key: None,
        }
    }
}

impl AiConfig {
    /// Key for the secondary and last-resort endpoints; defaults to the primary key
    pub fn effective_fallback_key(&self) -> Option<String> {
        self.fallback_api_key.clone().or_else(|| self.api_key.clone())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupabaseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anon_key: Option<String>,
    #[serde(default = "default_supabase_timeout")]
    pub timeout_secs: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        SupabaseConfig {
            url: None,
            anon_key: None,
            timeout_secs: default_supabase_timeout(),
        }
    }
}

impl SupabaseConfig {
    /// Connection settings, if both the URL and the anon key are known
    pub fn backend(&self) -> Option<BackendConfig> {
        let url = self.url.as_deref().filter(|u| !u.trim().is_empty())?;
        let anon_key = self.anon_key.as_deref().filter(|k| !k.trim().is_empty())?;
        Some(BackendConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MusicConfig {
    #[serde(default = "default_true")]
    pub open_in_browser: bool,
}

impl Default for MusicConfig {
    fn default() -> Self {
        MusicConfig {
            open_in_browser: true,
        }
    }
}

/// Timer defaults for a first launch (before settings.json exists).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PomodoroConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default = "default_true")]
    pub auto_start_breaks: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        PomodoroConfig {
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
            auto_start_breaks: true,
            sound_enabled: true,
        }
    }
}

impl PomodoroConfig {
    /// Out-of-range minutes are ignored in favour of the built-in defaults.
    pub fn to_settings(&self) -> PomodoroSettings {
        PomodoroSettings {
            focus_minutes: self.focus_minutes,
            break_minutes: self.break_minutes,
            auto_start_breaks: self.auto_start_breaks,
            sound_enabled: self.sound_enabled,
            ..PomodoroSettings::default()
        }
        .sanitized()
    }
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_ai_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_primary_model() -> String {
    "deepseek/deepseek-chat-v3-0324:free".to_string()
}

fn default_secondary_model() -> String {
    "google/gemma-3-27b-it:free".to_string()
}

fn default_last_resort_model() -> String {
    "google/gemma-3-27b-it:free".to_string()
}

fn default_site_url() -> String {
    "https://noteflow.app".to_string()
}

fn default_site_name() -> String {
    "NoteFlow - Mood-Based Productivity".to_string()
}

fn default_ai_timeout() -> u64 {
    30
}

fn default_supabase_timeout() -> u64 {
    15
}

fn default_true() -> bool {
    true
}

fn default_focus_minutes() -> u32 {
    25
}

fn default_break_minutes() -> u32 {
    5
}

/// `<config_dir>/noteflow/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("noteflow").join("config.toml"))
}

/// Load configuration from disk, falling back to defaults on any error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded config");
            data
        }
        Err(err) => {
            debug!(path = %path.display(), "No config file, using defaults: {err}");
            return AppConfig::default();
        }
    };

    parse_config(&contents).unwrap_or_else(|err| {
        warn!(path = %path.display(), "Invalid config TOML: {err}");
        AppConfig::default()
    })
}

fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str::<AppConfig>(contents)
}

/// Apply environment overrides on top of the file values.
pub fn apply_env(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = get(ENV_API_KEY) {
        config.ai.api_key = Some(key);
    }
    if let Some(key) = get(ENV_FALLBACK_API_KEY) {
        config.ai.fallback_api_key = Some(key);
    }
    if let Some(url) = get(ENV_SUPABASE_URL) {
        config.supabase.url = Some(url);
    }
    if let Some(key) = get(ENV_SUPABASE_ANON_KEY) {
        config.supabase.anon_key = Some(key);
    }
}

/// Load from `path` (or the default location) and apply the process environment.
pub fn load(path: Option<&Path>) -> AppConfig {
    let mut config = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => load_config(&p),
        None => AppConfig::default(),
    };
    apply_env(&mut config, |name| std::env::var(name).ok());
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_gives_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.log_level, LogLevel::Info);
        assert_eq!(cfg.ai.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(cfg.ai.timeout_secs, 30);
        assert_eq!(cfg.supabase.timeout_secs, 15);
        assert!(cfg.music.open_in_browser);
        assert_eq!(cfg.pomodoro.focus_minutes, 25);
    }

    #[test]
    fn test_partial_sections() {
        let cfg = parse_config(
            r#"
            log_level = "debug"

            [ai]
            primary_model = "custom/model"

            [pomodoro]
            focus_minutes = 50
            sound_enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.ai.primary_model, "custom/model");
        assert_eq!(cfg.ai.secondary_model, "google/gemma-3-27b-it:free");
        let settings = cfg.pomodoro.to_settings();
        assert_eq!(settings.focus_minutes, 50);
        assert_eq!(settings.break_minutes, 5);
        assert!(!settings.sound_enabled);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = [").unwrap();
        let cfg = load_config(&path);
        assert_eq!(cfg.log_level, LogLevel::Info);
    }

    #[test]
    fn test_out_of_range_timer_defaults_ignored() {
        let cfg = PomodoroConfig {
            focus_minutes: 500,
            break_minutes: 0,
            auto_start_breaks: false,
            sound_enabled: true,
        };
        let settings = cfg.to_settings();
        assert_eq!(settings.focus_minutes, 25);
        assert_eq!(settings.break_minutes, 5);
        assert!(!settings.auto_start_breaks);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_KEY, "primary-key"),
            (ENV_SUPABASE_URL, "https://example.supabase.co/"),
            (ENV_SUPABASE_ANON_KEY, "anon"),
            (ENV_FALLBACK_API_KEY, "  "),
        ]
        .into_iter()
        .collect();
        let mut cfg = AppConfig::default();
        apply_env(&mut cfg, |name| env.get(name).map(|v| v.to_string()));

        assert_eq!(cfg.ai.api_key.as_deref(), Some("primary-key"));
        assert_eq!(cfg.ai.fallback_api_key, None);
        assert_eq!(cfg.ai.effective_fallback_key().as_deref(), Some("primary-key"));

        let backend = cfg.supabase.backend().unwrap();
        assert_eq!(backend.url, "https://example.supabase.co");
        assert_eq!(backend.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_backend_requires_both_values() {
        let cfg = SupabaseConfig {
            url: Some("https://x.supabase.co".into()),
            anon_key: None,
            timeout_secs: 15,
        };
        assert!(cfg.backend().is_none());
    }
}
