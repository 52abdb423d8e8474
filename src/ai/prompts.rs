use crate::domain::Mood;
use regex::Regex;
use std::sync::LazyLock;

/// System prompt for the free-form chat; always built from the current mood
pub fn chat_system_prompt(mood: Mood) -> String {
    let data = mood.data();
    format!(
        "You are a helpful AI assistant integrated into NoteFlow, a mood-based productivity app. \
         The user's current mood is: {} - {}. Adapt your tone and responses to match this mood. \
         Keep your responses concise, helpful, and supportive. You can help with productivity \
         tips, answer questions about study topics, or provide general assistance.",
        data.label, data.description
    )
}

/// System prompt for focus mode, scoped to one task
pub fn focus_system_prompt(task_text: &str, mood: Mood) -> String {
    let data = mood.data();
    format!(
        "You are a helpful AI assistant in a focus mode for a task management app. \
         The user is currently working on the task: \"{task_text}\". Their current mood is: {} - {}. \
         Provide concise, helpful responses that help them complete their task. If they ask for \
         sub-tasks, provide 3-5 clear, actionable steps. Format your response using Markdown for \
         better readability.",
        data.label, data.description
    )
}

/// Canned and free-text prompts offered in focus mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistPrompt {
    Stuck,
    Breakdown,
    Motivation,
    Research,
    Custom(String),
}

impl AssistPrompt {
    pub fn label(&self) -> &str {
        match self {
            AssistPrompt::Stuck => "I'm stuck",
            AssistPrompt::Breakdown => "Break down task",
            AssistPrompt::Motivation => "Motivate me",
            AssistPrompt::Research => "How to approach",
            AssistPrompt::Custom(_) => "Ask",
        }
    }

    pub fn user_message(&self, task_text: &str, mood: Mood) -> String {
        match self {
            AssistPrompt::Stuck => format!(
                "I'm stuck on this task: \"{task_text}\". Can you give me some suggestions to move forward?"
            ),
            AssistPrompt::Breakdown => format!(
                "Can you help me break down this task into smaller sub-tasks? Task: \"{task_text}\""
            ),
            AssistPrompt::Motivation => format!(
                "I need some motivation to complete this task: \"{task_text}\". My current mood is {}.",
                mood.label()
            ),
            AssistPrompt::Research => format!(
                "Can you provide a brief summary or steps on how to approach this task? Task: \"{task_text}\""
            ),
            AssistPrompt::Custom(text) => text.trim().to_string(),
        }
    }
}

static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+[.)]\s|-\s|\*\s)").unwrap());

/// Lines of a reply that look like list items, with the marker stripped
pub fn parse_breakdown(reply: &str) -> Vec<String> {
    let re = &*LIST_MARKER_RE;
    reply
        .lines()
        .map(str::trim)
        .filter(|line| re.is_match(line))
        .map(|line| re.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
