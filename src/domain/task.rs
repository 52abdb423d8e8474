use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Task category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Work,
    Study,
}

impl Default for Category {
    fn default() -> Self {
        Category::Personal
    }
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Study => "study",
        }
    }

    pub fn all() -> &'static [Category] {
        &[Category::Personal, Category::Work, Category::Study]
    }

    /// Next category in cycle order (used by the input form)
    pub fn next(&self) -> Category {
        match self {
            Category::Personal => Category::Work,
            Category::Work => Category::Study,
            Category::Study => Category::Personal,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(Category::Personal),
            "work" => Ok(Category::Work),
            "study" => Ok(Category::Study),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Sub-task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubTaskStatus {
    Todo,
    InProgress,
    Done,
}

impl Default for SubTaskStatus {
    fn default() -> Self {
        SubTaskStatus::Todo
    }
}

impl SubTaskStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            SubTaskStatus::Todo => "[ ]",
            SubTaskStatus::InProgress => "[~]",
            SubTaskStatus::Done => "[x]",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubTaskStatus::Todo => "todo",
            SubTaskStatus::InProgress => "inProgress",
            SubTaskStatus::Done => "done",
        }
    }

    /// Todo -> InProgress -> Done -> Todo
    pub fn cycle(&self) -> SubTaskStatus {
        match self {
            SubTaskStatus::Todo => SubTaskStatus::InProgress,
            SubTaskStatus::InProgress => SubTaskStatus::Done,
            SubTaskStatus::Done => SubTaskStatus::Todo,
        }
    }
}

impl FromStr for SubTaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(SubTaskStatus::Todo),
            "inProgress" | "in_progress" => Ok(SubTaskStatus::InProgress),
            "done" => Ok(SubTaskStatus::Done),
            _ => Err(format!("Unknown sub-task status: {}", s)),
        }
    }
}

/// Returns the trimmed text, or None when nothing is left
pub fn validate_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub status: SubTaskStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SubTask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            status: SubTaskStatus::Todo,
            created_at: Utc::now(),
            due_date: None,
            notes: None,
        }
    }

    /// Flip completion; status follows (done <-> todo)
    pub fn toggle(&mut self) {
        if self.completed {
            self.completed = false;
            self.status = SubTaskStatus::Todo;
        } else {
            self.completed = true;
            self.status = SubTaskStatus::Done;
        }
    }

    /// Set the status; completion follows
    pub fn set_status(&mut self, status: SubTaskStatus) {
        self.status = status;
        self.completed = status == SubTaskStatus::Done;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
}

impl Task {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            category,
            priority: false,
            created_at: Utc::now(),
            due_date: None,
            notes: None,
            sub_tasks: Vec::new(),
        }
    }

    /// Rename the task. Returns false for blank or unchanged text.
    pub fn rename(&mut self, text: &str) -> bool {
        match validate_text(text) {
            Some(t) if t != self.text => {
                self.text = t;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_complete(&mut self) {
        self.completed = !self.completed;
    }

    pub fn toggle_priority(&mut self) {
        self.priority = !self.priority;
    }

    pub fn set_due_date(&mut self, date: Option<NaiveDate>) {
        self.due_date = date;
    }

    /// Set notes; blank notes clear the field
    pub fn set_notes(&mut self, notes: &str) {
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes.to_string())
        };
    }

    /// Append a sub-task. Returns its id, or None for blank text.
    pub fn add_sub_task(&mut self, text: &str) -> Option<Uuid> {
        let text = validate_text(text)?;
        let sub = SubTask::new(text);
        let id = sub.id;
        self.sub_tasks.push(sub);
        Some(id)
    }

    /// Append every non-blank line as a sub-task; returns how many were added
    pub fn add_sub_tasks<S: AsRef<str>>(&mut self, texts: &[S]) -> usize {
        texts
            .iter()
            .filter_map(|t| self.add_sub_task(t.as_ref()))
            .count()
    }

    pub fn sub_task_mut(&mut self, id: Uuid) -> Option<&mut SubTask> {
        self.sub_tasks.iter_mut().find(|s| s.id == id)
    }

    pub fn toggle_sub_task(&mut self, id: Uuid) -> bool {
        match self.sub_task_mut(id) {
            Some(sub) => {
                sub.toggle();
                true
            }
            None => false,
        }
    }

    pub fn set_sub_task_status(&mut self, id: Uuid, status: SubTaskStatus) -> bool {
        match self.sub_task_mut(id) {
            Some(sub) => {
                sub.set_status(status);
                true
            }
            None => false,
        }
    }

    pub fn rename_sub_task(&mut self, id: Uuid, text: &str) -> bool {
        let Some(text) = validate_text(text) else {
            return false;
        };
        match self.sub_task_mut(id) {
            Some(sub) if sub.text != text => {
                sub.text = text;
                true
            }
            _ => false,
        }
    }

    pub fn delete_sub_task(&mut self, id: Uuid) -> bool {
        let before = self.sub_tasks.len();
        self.sub_tasks.retain(|s| s.id != id);
        self.sub_tasks.len() != before
    }

    pub fn completed_sub_tasks(&self) -> usize {
        self.sub_tasks.iter().filter(|s| s.completed).count()
    }

    /// Fraction of sub-tasks completed (0.0 when there are none)
    pub fn progress(&self) -> f64 {
        if self.sub_tasks.is_empty() {
            return 0.0;
        }
        self.completed_sub_tasks() as f64 / self.sub_tasks.len() as f64
    }

    pub fn all_sub_tasks_done(&self) -> bool {
        !self.sub_tasks.is_empty() && self.sub_tasks.iter().all(|s| s.completed)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.map(|d| d < today).unwrap_or(false)
    }

    pub fn is_due_today(&self, today: NaiveDate) -> bool {
        self.due_date == Some(today)
    }
}

/// Human label for a due date relative to `today`
pub fn format_due_date(date: NaiveDate, today: NaiveDate) -> String {
    let days = (date - today).num_days();
    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d if d < 7 => date.format("%A").to_string(),
        _ => format!("{} {}, {}", date.format("%b"), date.day(), date.year()),
    }
}

/// Parse a due date from user input: `today`, `tomorrow`, `+N` days, or `YYYY-MM-DD`
pub fn parse_due_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = input.trim().to_lowercase();
    match s.as_str() {
        "today" => Some(today),
        "tomorrow" => today.succ_opt(),
        _ => {
            if let Some(n) = s.strip_prefix('+') {
                if !n.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                let days: i64 = n.parse().ok()?;
                return today.checked_add_signed(chrono::Duration::try_days(days)?);
            }
            NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_subtask_toggle_keeps_status_in_sync() {
        let mut sub = SubTask::new("write tests");
        sub.toggle();
        assert!(sub.completed);
        assert_eq!(sub.status, SubTaskStatus::Done);
        sub.toggle();
        assert!(!sub.completed);
        assert_eq!(sub.status, SubTaskStatus::Todo);
    }

    #[test]
    fn test_subtask_set_status() {
        let mut sub = SubTask::new("draft");
        sub.set_status(SubTaskStatus::Done);
        assert!(sub.completed);
        sub.set_status(SubTaskStatus::InProgress);
        assert!(!sub.completed);
        assert_eq!(sub.status.cycle(), SubTaskStatus::Done);
    }

    #[test]
    fn test_rename_rejects_blank_and_unchanged() {
        let mut task = Task::new("Buy milk", Category::Personal);
        assert!(!task.rename("   "));
        assert!(!task.rename("Buy milk"));
        assert!(task.rename("  Buy oat milk "));
        assert_eq!(task.text, "Buy oat milk");
    }

    #[test]
    fn test_add_sub_tasks_skips_blank() {
        let mut task = Task::new("Plan trip", Category::Personal);
        assert!(task.add_sub_task("").is_none());
        let added = task.add_sub_tasks(&["Book flights", " ", "Pack"]);
        assert_eq!(added, 2);
        assert_eq!(task.sub_tasks.len(), 2);
    }

    #[test]
    fn test_progress() {
        let mut task = Task::new("Essay", Category::Study);
        assert_eq!(task.progress(), 0.0);
        assert!(!task.all_sub_tasks_done());
        let a = task.add_sub_task("Outline").unwrap();
        let b = task.add_sub_task("Draft").unwrap();
        task.toggle_sub_task(a);
        assert_eq!(task.progress(), 0.5);
        task.set_sub_task_status(b, SubTaskStatus::Done);
        assert!(task.all_sub_tasks_done());
        assert!(task.delete_sub_task(a));
        assert!(!task.delete_sub_task(a));
    }

    #[test]
    fn test_rename_sub_task() {
        let mut task = Task::new("Essay", Category::Study);
        let id = task.add_sub_task("Outline").unwrap();
        assert!(!task.rename_sub_task(id, " "));
        assert!(!task.rename_sub_task(id, "Outline"));
        assert!(task.rename_sub_task(id, "Detailed outline"));
    }

    #[test]
    fn test_overdue_only_for_open_tasks() {
        let today = date(2024, 3, 10);
        let mut task = Task::new("Taxes", Category::Work);
        task.set_due_date(Some(date(2024, 3, 9)));
        assert!(task.is_overdue(today));
        task.toggle_complete();
        assert!(!task.is_overdue(today));
    }

    #[test]
    fn test_format_due_date() {
        let today = date(2024, 3, 10); // Sunday
        assert_eq!(format_due_date(today, today), "Today");
        assert_eq!(format_due_date(date(2024, 3, 11), today), "Tomorrow");
        assert_eq!(format_due_date(date(2024, 3, 13), today), "Wednesday");
        assert_eq!(format_due_date(date(2024, 3, 20), today), "Mar 20, 2024");
        assert_eq!(format_due_date(date(2024, 3, 9), today), "Saturday");
        assert_eq!(format_due_date(date(2024, 3, 1), today), "Friday");
    }

    #[test]
    fn test_parse_due_date() {
        let today = date(2024, 3, 10);
        assert_eq!(parse_due_date("today", today), Some(today));
        assert_eq!(parse_due_date("Tomorrow", today), Some(date(2024, 3, 11)));
        assert_eq!(parse_due_date("+7", today), Some(date(2024, 3, 17)));
        assert_eq!(parse_due_date("2024-12-25", today), Some(date(2024, 12, 25)));
        assert_eq!(parse_due_date("someday", today), None);
    }

    #[test]
    fn test_parse_due_date_rejects_out_of_range_offsets() {
        let today = date(2024, 3, 10);
        assert_eq!(parse_due_date("+9999999999999999", today), None);
        assert_eq!(parse_due_date("+99999999999999999999", today), None);
        assert_eq!(parse_due_date("+-5", today), None);
        assert_eq!(parse_due_date("+", today), None);
    }

    #[test]
    fn test_task_json_is_camel_case() {
        let mut task = Task::new("Read", Category::Study);
        task.add_sub_task("Chapter 1");
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["category"], "study");
        assert_eq!(json["subTasks"][0]["status"], "todo");
        assert!(json.get("dueDate").is_none());
    }
}
