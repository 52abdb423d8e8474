use crate::domain::{Mood, PomodoroSettings};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

fn default_true() -> bool {
    true
}

fn default_volume() -> u8 {
    70
}

/// Which panels focus mode shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusModeSettings {
    #[serde(default = "default_true")]
    pub show_timer: bool,
    #[serde(default = "default_true")]
    pub enable_music: bool,
    #[serde(default = "default_true", rename = "enableAI")]
    pub enable_ai: bool,
}

impl Default for FocusModeSettings {
    fn default() -> Self {
        Self {
            show_timer: true,
            enable_music: true,
            enable_ai: true,
        }
    }
}

/// A finished pomodoro focus phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub completed_at: DateTime<Utc>,
    pub minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

/// Client-side settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub current_mood: Mood,
    #[serde(default)]
    pub guest_mode: bool,
    #[serde(default)]
    pub has_visited: bool,
    #[serde(default)]
    pub pomodoro: PomodoroSettings,
    #[serde(default)]
    pub focus_mode: FocusModeSettings,
    #[serde(default = "default_volume")]
    pub music_volume: u8,
    #[serde(default)]
    pub recent_searches: Vec<String>,
    #[serde(default)]
    pub liked_videos: Vec<String>,
    #[serde(default)]
    pub focus_sessions: Vec<FocusSession>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_mood: Mood::default(),
            guest_mode: false,
            has_visited: false,
            pomodoro: PomodoroSettings::default(),
            focus_mode: FocusModeSettings::default(),
            music_volume: default_volume(),
            recent_searches: Vec::new(),
            liked_videos: Vec::new(),
            focus_sessions: Vec::new(),
        }
    }
}

impl Settings {
    pub fn record_focus_session(&mut self, minutes: u32, task: Option<String>) {
        self.focus_sessions.push(FocusSession {
            completed_at: Utc::now(),
            minutes,
            task,
        });
    }

    /// Focus sessions completed on a local calendar date
    pub fn sessions_on(&self, date: NaiveDate) -> Vec<&FocusSession> {
        self.focus_sessions
            .iter()
            .filter(|s| s.completed_at.with_timezone(&chrono::Local).date_naive() == date)
            .collect()
    }
}

/// Load settings; a missing file gives defaults, a corrupt one is logged and ignored
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Settings>(&content) {
        Ok(mut settings) => {
            let pomodoro = settings.pomodoro.clone().sanitized();
            if pomodoro != settings.pomodoro {
                warn!(path = %path.display(), "timer lengths out of range, using defaults");
                settings.pomodoro = pomodoro;
            }
            Ok(settings)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid settings file, using defaults");
            Ok(Settings::default())
        }
    }
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
