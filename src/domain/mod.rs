pub mod document;
pub mod enums;
pub mod mood;
pub mod music;
pub mod phrases;
pub mod pomodoro;
pub mod task;
pub mod views;

pub use document::{Document, DocumentError, DocumentShelf};
pub use enums::{StorageMode, UiMode};
pub use mood::{AnimationSpeed, AnimationStyle, Mood, MoodData, MoodState, Rgb};
pub use music::{Player, SearchOutcome, Video};
pub use phrases::{random_affirmation, time_greeting};
pub use pomodoro::{AlarmTone, Phase, Pomodoro, PomodoroError, PomodoroSettings, TimerEvent};
pub use task::{format_due_date, parse_due_date, Category, SubTask, SubTaskStatus, Task};
pub use views::{count_tasks, flatten_tasks, progress_bar, tree_connector, FlatRow, TaskCounts};
