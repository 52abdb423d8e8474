use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use super::phrases::random_quote;

/// How long the mood-change transition lasts
pub const TRANSITION: Duration = Duration::from_millis(1500);

/// How long a mood quote stays on screen after a mood change
pub const QUOTE_VISIBLE: Duration = Duration::from_secs(5);

/// The user's current mood. Drives palette, animation and copy text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    Motivated,
    FeelingLow,
    Energized,
    Lazy,
    Focused,
    Creative,
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Motivated
    }
}

/// 24-bit color triple; converted to a terminal color by the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodPalette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationSpeed {
    VerySlow,
    Slow,
    Medium,
    Fast,
    VeryFast,
}

impl AnimationSpeed {
    /// Number of UI ticks each animation frame is held for
    pub fn ticks_per_frame(&self) -> u32 {
        match self {
            AnimationSpeed::VerySlow => 8,
            AnimationSpeed::Slow => 6,
            AnimationSpeed::Medium => 4,
            AnimationSpeed::Fast => 2,
            AnimationSpeed::VeryFast => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnimationSpeed::VerySlow => "very-slow",
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
            AnimationSpeed::VeryFast => "very-fast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStyle {
    Bounce,
    Fade,
    Pulse,
    Float,
    Minimal,
    Playful,
}

/// Static theme data for a mood
#[derive(Debug, Clone, Copy)]
pub struct MoodData {
    pub label: &'static str,
    pub description: &'static str,
    pub palette: MoodPalette,
    pub music_type: &'static str,
    pub task_placeholder: &'static str,
    pub empty_state_message: &'static str,
    pub animation_speed: AnimationSpeed,
    pub animation_style: AnimationStyle,
    pub typography: &'static str,
}

const MOTIVATED: MoodData = MoodData {
    label: "Motivated",
    description: "Ready to conquer the day!",
    palette: MoodPalette {
        primary: Rgb(249, 115, 22),
        secondary: Rgb(239, 68, 68),
        accent: Rgb(250, 204, 21),
        background: Rgb(255, 247, 237),
    },
    music_type: "Upbeat Lofi",
    task_placeholder: "What do you want to accomplish today?",
    empty_state_message: "Add your first task and start crushing goals!",
    animation_speed: AnimationSpeed::Fast,
    animation_style: AnimationStyle::Bounce,
    typography: "bold",
};

const FEELING_LOW: MoodData = MoodData {
    label: "Feeling Low",
    description: "Take it easy today",
    palette: MoodPalette {
        primary: Rgb(96, 165, 250),
        secondary: Rgb(192, 132, 252),
        accent: Rgb(165, 180, 252),
        background: Rgb(239, 246, 255),
    },
    music_type: "Calming Piano Lofi",
    task_placeholder: "What small step can you take today?",
    empty_state_message: "Start with something small. You've got this.",
    animation_speed: AnimationSpeed::Slow,
    animation_style: AnimationStyle::Fade,
    typography: "gentle",
};

const ENERGIZED: MoodData = MoodData {
    label: "Energized",
    description: "Full of energy and ready to go!",
    palette: MoodPalette {
        primary: Rgb(6, 182, 212),
        secondary: Rgb(74, 222, 128),
        accent: Rgb(59, 130, 246),
        background: Rgb(236, 254, 255),
    },
    music_type: "High-Tempo Beats",
    task_placeholder: "Channel that energy! What's next?",
    empty_state_message: "Add tasks and make the most of your energy!",
    animation_speed: AnimationSpeed::VeryFast,
    animation_style: AnimationStyle::Pulse,
    typography: "dynamic",
};

const LAZY: MoodData = MoodData {
    label: "Lazy",
    description: "Taking it slow today",
    palette: MoodPalette {
        primary: Rgb(252, 211, 77),
        secondary: Rgb(253, 164, 175),
        accent: Rgb(254, 215, 170),
        background: Rgb(255, 251, 235),
    },
    music_type: "Slow Chill Beats",
    task_placeholder: "What's one easy thing you can do?",
    empty_state_message: "No rush. Add tasks when you're ready.",
    animation_speed: AnimationSpeed::VerySlow,
    animation_style: AnimationStyle::Float,
    typography: "relaxed",
};

const FOCUSED: MoodData = MoodData {
    label: "Focused",
    description: "In the zone, distraction-free",
    palette: MoodPalette {
        primary: Rgb(156, 163, 175),
        secondary: Rgb(75, 85, 99),
        accent: Rgb(107, 114, 128),
        background: Rgb(249, 250, 251),
    },
    music_type: "Deep Focus",
    task_placeholder: "What requires your focus today?",
    empty_state_message: "Clear mind, clear tasks. Add what needs focus.",
    animation_speed: AnimationSpeed::Medium,
    animation_style: AnimationStyle::Minimal,
    typography: "clean",
};

const CREATIVE: MoodData = MoodData {
    label: "Creative",
    description: "Ideas flowing freely",
    palette: MoodPalette {
        primary: Rgb(244, 114, 182),
        secondary: Rgb(168, 85, 247),
        accent: Rgb(167, 139, 250),
        background: Rgb(253, 242, 248),
    },
    music_type: "Creative Jazz Hop",
    task_placeholder: "What creative ideas are you working on?",
    empty_state_message: "A blank canvas awaits your creative tasks!",
    animation_speed: AnimationSpeed::Medium,
    animation_style: AnimationStyle::Playful,
    typography: "artistic",
};

impl Mood {
    /// Get the theme data for this mood
    pub fn data(&self) -> &'static MoodData {
        match self {
            Mood::Motivated => &MOTIVATED,
            Mood::FeelingLow => &FEELING_LOW,
            Mood::Energized => &ENERGIZED,
            Mood::Lazy => &LAZY,
            Mood::Focused => &FOCUSED,
            Mood::Creative => &CREATIVE,
        }
    }

    pub fn label(&self) -> &'static str {
        self.data().label
    }

    /// Wire name used in settings files and the `user_settings` table
    pub fn key(&self) -> &'static str {
        match self {
            Mood::Motivated => "motivated",
            Mood::FeelingLow => "feelingLow",
            Mood::Energized => "energized",
            Mood::Lazy => "lazy",
            Mood::Focused => "focused",
            Mood::Creative => "creative",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Mood::Motivated => "🔥",
            Mood::FeelingLow => "🌧",
            Mood::Energized => "⚡",
            Mood::Lazy => "☕",
            Mood::Focused => "🎯",
            Mood::Creative => "🎨",
        }
    }

    /// All moods in selector order
    pub fn all() -> &'static [Mood] {
        &[
            Mood::Motivated,
            Mood::FeelingLow,
            Mood::Energized,
            Mood::Lazy,
            Mood::Focused,
            Mood::Creative,
        ]
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "motivated" => Ok(Mood::Motivated),
            "feelinglow" | "low" => Ok(Mood::FeelingLow),
            "energized" => Ok(Mood::Energized),
            "lazy" => Ok(Mood::Lazy),
            "focused" => Ok(Mood::Focused),
            "creative" => Ok(Mood::Creative),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

/// Current mood plus the bookkeeping for a mood change
#[derive(Debug, Clone)]
pub struct MoodState {
    pub current: Mood,
    pub previous: Option<Mood>,
    pub changed_at: Option<Instant>,
    pub quote: Option<&'static str>,
}

impl MoodState {
    pub fn new(mood: Mood) -> Self {
        Self {
            current: mood,
            previous: None,
            changed_at: None,
            quote: None,
        }
    }

    /// Switch mood. Returns false if `mood` is already current.
    pub fn set(&mut self, mood: Mood, now: Instant) -> bool {
        if mood == self.current {
            return false;
        }
        self.previous = Some(self.current);
        self.current = mood;
        self.changed_at = Some(now);
        self.quote = Some(random_quote(mood));
        true
    }

    pub fn data(&self) -> &'static MoodData {
        self.current.data()
    }

    pub fn is_transitioning(&self, now: Instant) -> bool {
        self.changed_at
            .map(|at| now.saturating_duration_since(at) < TRANSITION)
            .unwrap_or(false)
    }

    /// The quote picked on the last mood change, while it is still showing
    pub fn visible_quote(&self, now: Instant) -> Option<&'static str> {
        let at = self.changed_at?;
        if now.saturating_duration_since(at) < QUOTE_VISIBLE {
            self.quote
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_wire_names() {
        assert_eq!(serde_json::to_string(&Mood::FeelingLow).unwrap(), "\"feelingLow\"");
        assert_eq!(
            serde_json::from_str::<Mood>("\"creative\"").unwrap(),
            Mood::Creative
        );
        for mood in Mood::all() {
            let json = serde_json::to_string(mood).unwrap();
            assert_eq!(json, format!("\"{}\"", mood.key()));
        }
    }

    #[test]
    fn test_mood_from_str() {
        assert_eq!("feeling-low".parse::<Mood>(), Ok(Mood::FeelingLow));
        assert_eq!("feelingLow".parse::<Mood>(), Ok(Mood::FeelingLow));
        assert_eq!("FOCUSED".parse::<Mood>(), Ok(Mood::Focused));
        assert!("grumpy".parse::<Mood>().is_err());
    }

    #[test]
    fn test_mood_data() {
        assert_eq!(Mood::Lazy.data().animation_speed, AnimationSpeed::VerySlow);
        assert_eq!(Mood::Energized.data().animation_style, AnimationStyle::Pulse);
        assert_eq!(Mood::Motivated.data().music_type, "Upbeat Lofi");
        assert_eq!(Mood::all().len(), 6);
    }

    #[test]
    fn test_set_same_mood_is_noop() {
        let mut state = MoodState::new(Mood::Motivated);
        let now = Instant::now();
        assert!(!state.set(Mood::Motivated, now));
        assert!(state.previous.is_none());
        assert!(!state.is_transitioning(now));
        assert!(state.visible_quote(now).is_none());
    }

    #[test]
    fn test_set_mood_transition_and_quote() {
        let mut state = MoodState::new(Mood::Motivated);
        let now = Instant::now();
        assert!(state.set(Mood::Lazy, now));
        assert_eq!(state.current, Mood::Lazy);
        assert_eq!(state.previous, Some(Mood::Motivated));

        assert!(state.is_transitioning(now + Duration::from_millis(500)));
        assert!(!state.is_transitioning(now + Duration::from_secs(2)));

        let quote = state.visible_quote(now + Duration::from_secs(1));
        assert!(quote.is_some());
        assert!(super::super::phrases::quotes_for(Mood::Lazy).contains(&quote.unwrap()));
        assert!(state.visible_quote(now + Duration::from_secs(6)).is_none());
    }
}
