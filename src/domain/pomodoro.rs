use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

pub const FOCUS_PRESETS: [u32; 5] = [15, 25, 30, 45, 60];
pub const BREAK_PRESETS: [u32; 4] = [5, 10, 15, 20];
pub const MAX_FOCUS_MINUTES: u32 = 120;
pub const MAX_BREAK_MINUTES: u32 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PomodoroError {
    #[error("Invalid Duration: please enter a number between 1 and 120 minutes")]
    InvalidFocusDuration,
    #[error("Invalid Duration: please enter a number between 1 and 60 minutes")]
    InvalidBreakDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::Break => "Break",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmTone {
    Chiptune,
    Lofi,
    Retro,
}

impl AlarmTone {
    pub fn name(&self) -> &'static str {
        match self {
            AlarmTone::Chiptune => "Chiptune Alarm",
            AlarmTone::Lofi => "Lofi Alarm",
            AlarmTone::Retro => "Retro Game Alarm",
        }
    }

    pub fn next(&self) -> AlarmTone {
        match self {
            AlarmTone::Chiptune => AlarmTone::Lofi,
            AlarmTone::Lofi => AlarmTone::Retro,
            AlarmTone::Retro => AlarmTone::Chiptune,
        }
    }
}

fn default_focus_minutes() -> u32 {
    25
}

fn default_break_minutes() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_volume() -> u8 {
    70
}

fn default_tone() -> AlarmTone {
    AlarmTone::Chiptune
}

/// User-tunable timer settings, persisted with the rest of the settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default = "default_true")]
    pub auto_start_breaks: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_volume")]
    pub alarm_volume: u8,
    #[serde(default = "default_tone")]
    pub alarm_tone: AlarmTone,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
            auto_start_breaks: true,
            sound_enabled: true,
            alarm_volume: default_volume(),
            alarm_tone: default_tone(),
        }
    }
}

impl PomodoroSettings {
    /// Minutes outside the accepted ranges revert to the defaults
    pub fn sanitized(mut self) -> Self {
        if !(1..=MAX_FOCUS_MINUTES).contains(&self.focus_minutes) {
            self.focus_minutes = default_focus_minutes();
        }
        if !(1..=MAX_BREAK_MINUTES).contains(&self.break_minutes) {
            self.break_minutes = default_break_minutes();
        }
        self.alarm_volume = self.alarm_volume.min(100);
        self
    }
}

/// Emitted by `tick` when a phase runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    FocusComplete { minutes: u32 },
    BreakComplete,
}

impl TimerEvent {
    pub fn title(&self) -> &'static str {
        match self {
            TimerEvent::FocusComplete { .. } => "Focus session complete!",
            TimerEvent::BreakComplete => "Break time's over!",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TimerEvent::FocusComplete { .. } => "Time for a well-deserved break.",
            TimerEvent::BreakComplete => "Ready to focus again?",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pomodoro {
    pub settings: PomodoroSettings,
    pub phase: Phase,
    pub seconds_left: u32,
    /// Started since the last reset (stays true while paused)
    pub active: bool,
    /// Currently counting down
    pub running: bool,
    last_tick: Option<Instant>,
    carry: Duration,
}

impl Pomodoro {
    pub fn new(settings: PomodoroSettings) -> Self {
        let settings = settings.sanitized();
        let seconds_left = settings.focus_minutes * 60;
        Self {
            settings,
            phase: Phase::Focus,
            seconds_left,
            active: false,
            running: false,
            last_tick: None,
            carry: Duration::ZERO,
        }
    }

    pub fn phase_seconds(&self) -> u32 {
        match self.phase {
            Phase::Focus => self.settings.focus_minutes * 60,
            Phase::Break => self.settings.break_minutes * 60,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.active = true;
        self.running = true;
        self.last_tick = Some(now);
    }

    pub fn pause(&mut self) {
        self.running = false;
        self.last_tick = None;
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.running {
            self.pause();
        } else {
            self.start(now);
        }
    }

    /// Back to the full length of the current phase, stopped
    pub fn reset(&mut self) {
        self.active = false;
        self.running = false;
        self.last_tick = None;
        self.carry = Duration::ZERO;
        self.seconds_left = self.phase_seconds();
    }

    /// Advance the countdown by the wall time since the last tick
    pub fn tick(&mut self, now: Instant) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        let last = self.last_tick.unwrap_or(now);
        let elapsed = now.saturating_duration_since(last) + self.carry;
        let whole = elapsed.as_secs();
        self.carry = elapsed - Duration::from_secs(whole);
        self.last_tick = Some(now);

        if whole < self.seconds_left as u64 {
            self.seconds_left -= whole as u32;
            return None;
        }
        Some(self.complete_phase(now))
    }

    fn complete_phase(&mut self, now: Instant) -> TimerEvent {
        self.carry = Duration::ZERO;
        match self.phase {
            Phase::Focus => {
                let minutes = self.settings.focus_minutes;
                self.phase = Phase::Break;
                self.seconds_left = self.settings.break_minutes * 60;
                if self.settings.auto_start_breaks {
                    self.start(now);
                } else {
                    self.active = false;
                    self.pause();
                }
                TimerEvent::FocusComplete { minutes }
            }
            Phase::Break => {
                self.phase = Phase::Focus;
                self.seconds_left = self.settings.focus_minutes * 60;
                self.active = false;
                self.pause();
                TimerEvent::BreakComplete
            }
        }
    }

    pub fn set_focus_minutes(&mut self, minutes: u32) -> Result<(), PomodoroError> {
        if minutes == 0 || minutes > MAX_FOCUS_MINUTES {
            return Err(PomodoroError::InvalidFocusDuration);
        }
        self.settings.focus_minutes = minutes;
        if self.phase == Phase::Focus && !self.active {
            self.seconds_left = minutes * 60;
        }
        Ok(())
    }

    pub fn set_break_minutes(&mut self, minutes: u32) -> Result<(), PomodoroError> {
        if minutes == 0 || minutes > MAX_BREAK_MINUTES {
            return Err(PomodoroError::InvalidBreakDuration);
        }
        self.settings.break_minutes = minutes;
        if self.phase == Phase::Break && !self.active {
            self.seconds_left = minutes * 60;
        }
        Ok(())
    }

    /// Apply a typed custom focus length
    pub fn apply_custom_focus(&mut self, input: &str) -> Result<(), PomodoroError> {
        let minutes = input
            .trim()
            .parse::<u32>()
            .map_err(|_| PomodoroError::InvalidFocusDuration)?;
        self.set_focus_minutes(minutes)
    }

    pub fn apply_custom_break(&mut self, input: &str) -> Result<(), PomodoroError> {
        let minutes = input
            .trim()
            .parse::<u32>()
            .map_err(|_| PomodoroError::InvalidBreakDuration)?;
        self.set_break_minutes(minutes)
    }

    /// Step to the next focus preset (wrapping)
    pub fn cycle_focus_preset(&mut self) {
        let next = next_preset(&FOCUS_PRESETS, self.settings.focus_minutes);
        let _ = self.set_focus_minutes(next);
    }

    pub fn cycle_break_preset(&mut self) {
        let next = next_preset(&BREAK_PRESETS, self.settings.break_minutes);
        let _ = self.set_break_minutes(next);
    }

    pub fn set_volume(&mut self, volume: i32) {
        self.settings.alarm_volume = volume.clamp(0, 100) as u8;
    }

    /// Elapsed fraction of the current phase
    pub fn progress(&self) -> f64 {
        let total = self.phase_seconds();
        if total == 0 {
            return 0.0;
        }
        (total - self.seconds_left.min(total)) as f64 / total as f64
    }

    /// Remaining time as `m:ss`
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.seconds_left / 60, self.seconds_left % 60)
    }
}

fn next_preset(presets: &[u32], current: u32) -> u32 {
    presets
        .iter()
        .copied()
        .find(|&p| p > current)
        .unwrap_or(presets[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_new_rejects_out_of_range_minutes() {
        let settings: PomodoroSettings =
            serde_json::from_str(r#"{"focusMinutes":4000000000,"breakMinutes":0,"alarmVolume":250}"#)
                .unwrap();
        let mut timer = Pomodoro::new(settings);
        assert_eq!(timer.settings.focus_minutes, 25);
        assert_eq!(timer.settings.break_minutes, 5);
        assert_eq!(timer.settings.alarm_volume, 100);
        assert_eq!(timer.seconds_left, 25 * 60);

        let now = Instant::now();
        timer.start(now);
        assert_eq!(timer.tick(now + secs(1)), None);
    }

    #[test]
    fn test_defaults() {
        let timer = Pomodoro::new(PomodoroSettings::default());
        assert_eq!(timer.seconds_left, 25 * 60);
        assert_eq!(timer.display(), "25:00");
        assert_eq!(timer.settings.alarm_volume, 70);
        assert_eq!(timer.settings.alarm_tone, AlarmTone::Chiptune);
        assert!(timer.settings.auto_start_breaks);
    }

    #[test]
    fn test_tick_counts_whole_seconds() {
        let mut timer = Pomodoro::new(PomodoroSettings::default());
        let t0 = Instant::now();
        timer.start(t0);
        assert_eq!(timer.tick(t0 + Duration::from_millis(600)), None);
        assert_eq!(timer.seconds_left, 1500);
        assert_eq!(timer.tick(t0 + Duration::from_millis(1200)), None);
        assert_eq!(timer.seconds_left, 1499);
        assert_eq!(timer.display(), "24:59");
    }

    #[test]
    fn test_paused_timer_does_not_tick() {
        let mut timer = Pomodoro::new(PomodoroSettings::default());
        let t0 = Instant::now();
        timer.start(t0);
        timer.pause();
        assert!(timer.active);
        assert_eq!(timer.tick(t0 + secs(30)), None);
        assert_eq!(timer.seconds_left, 1500);
    }

    #[test]
    fn test_focus_completion_auto_starts_break() {
        let mut timer = Pomodoro::new(PomodoroSettings::default());
        let t0 = Instant::now();
        timer.start(t0);
        let event = timer.tick(t0 + secs(1500));
        assert_eq!(event, Some(TimerEvent::FocusComplete { minutes: 25 }));
        assert_eq!(timer.phase, Phase::Break);
        assert_eq!(timer.seconds_left, 300);
        assert!(timer.running);
    }

    #[test]
    fn test_focus_completion_without_auto_start() {
        let settings = PomodoroSettings {
            auto_start_breaks: false,
            ..PomodoroSettings::default()
        };
        let mut timer = Pomodoro::new(settings);
        let t0 = Instant::now();
        timer.start(t0);
        timer.tick(t0 + secs(1600));
        assert_eq!(timer.phase, Phase::Break);
        assert!(!timer.running);
        assert!(!timer.active);
    }

    #[test]
    fn test_break_completion_stops_in_focus() {
        let mut timer = Pomodoro::new(PomodoroSettings::default());
        let t0 = Instant::now();
        timer.start(t0);
        timer.tick(t0 + secs(1500));
        let event = timer.tick(t0 + secs(1800));
        assert_eq!(event, Some(TimerEvent::BreakComplete));
        assert_eq!(timer.phase, Phase::Focus);
        assert_eq!(timer.seconds_left, 1500);
        assert!(!timer.running);
    }

    #[test]
    fn test_duration_validation() {
        let mut timer = Pomodoro::new(PomodoroSettings::default());
        assert_eq!(timer.set_focus_minutes(0), Err(PomodoroError::InvalidFocusDuration));
        assert_eq!(timer.set_focus_minutes(121), Err(PomodoroError::InvalidFocusDuration));
        assert_eq!(timer.set_break_minutes(61), Err(PomodoroError::InvalidBreakDuration));
        assert_eq!(timer.apply_custom_focus("abc"), Err(PomodoroError::InvalidFocusDuration));
        assert!(timer.apply_custom_focus(" 90 ").is_ok());
        assert_eq!(timer.seconds_left, 90 * 60);
    }

    #[test]
    fn test_duration_change_while_active_keeps_remaining() {
        let mut timer = Pomodoro::new(PomodoroSettings::default());
        let t0 = Instant::now();
        timer.start(t0);
        timer.tick(t0 + secs(10));
        timer.pause();
        timer.set_focus_minutes(45).unwrap();
        assert_eq!(timer.seconds_left, 1490);
        timer.reset();
        assert_eq!(timer.seconds_left, 45 * 60);
    }

    #[test]
    fn test_break_change_in_focus_phase_keeps_remaining() {
        let mut timer = Pomodoro::new(PomodoroSettings::default());
        timer.set_break_minutes(15).unwrap();
        assert_eq!(timer.seconds_left, 1500);
    }

    #[test]
    fn test_cycle_presets() {
        let mut timer = Pomodoro::new(PomodoroSettings::default());
        timer.cycle_focus_preset();
        assert_eq!(timer.settings.focus_minutes, 30);
        timer.settings.focus_minutes = 60;
        timer.cycle_focus_preset();
        assert_eq!(timer.settings.focus_minutes, 15);
        timer.cycle_break_preset();
        assert_eq!(timer.settings.break_minutes, 10);
    }

    #[test]
    fn test_progress() {
        let mut timer = Pomodoro::new(PomodoroSettings::default());
        assert_eq!(timer.progress(), 0.0);
        timer.seconds_left = 750;
        assert_eq!(timer.progress(), 0.5);
    }

    #[test]
    fn test_volume_clamped() {
        let mut timer = Pomodoro::new(PomodoroSettings::default());
        timer.set_volume(150);
        assert_eq!(timer.settings.alarm_volume, 100);
        timer.set_volume(-5);
        assert_eq!(timer.settings.alarm_volume, 0);
    }
}
