use crate::domain::{Category, SubTask, SubTaskStatus, Task};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `tasks` table row (snake_case columns)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<bool>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_tasks: Option<Vec<SubTaskRow>>,
}

/// `sub_tasks` table row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTaskRow {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<Uuid>,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Accepts `YYYY-MM-DD` or any timestamp starting with one
fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let v = value?;
    let head = v.get(..10).unwrap_or(v);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn parse_timestamp(value: Option<&str>) -> DateTime<Utc> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

impl TaskRow {
    pub fn from_task(task: &Task, user_id: &str) -> Self {
        Self {
            id: task.id,
            user_id: Some(user_id.to_string()),
            text: task.text.clone(),
            completed: task.completed,
            category: Some(task.category.name().to_string()),
            priority: Some(task.priority),
            due_date: format_date(task.due_date),
            notes: task.notes.clone(),
            created_at: None,
            sub_tasks: None,
        }
    }

    pub fn into_task(self) -> Task {
        let category = self
            .category
            .as_deref()
            .and_then(|c| c.parse::<Category>().ok())
            .unwrap_or_default();
        let sub_tasks = self
            .sub_tasks
            .unwrap_or_default()
            .into_iter()
            .map(SubTaskRow::into_sub_task)
            .collect();
        Task {
            id: self.id,
            text: self.text,
            completed: self.completed,
            category,
            priority: self.priority.unwrap_or(false),
            created_at: parse_timestamp(self.created_at.as_deref()),
            due_date: parse_date(self.due_date.as_deref()),
            notes: self.notes,
            sub_tasks,
        }
    }
}

impl SubTaskRow {
    pub fn from_sub_task(sub: &SubTask, task_id: Option<Uuid>) -> Self {
        Self {
            id: sub.id,
            task_id,
            text: sub.text.clone(),
            completed: sub.completed,
            status: Some(sub.status.name().to_string()),
            due_date: format_date(sub.due_date),
            notes: sub.notes.clone(),
            created_at: None,
        }
    }

    pub fn into_sub_task(self) -> SubTask {
        let status = self
            .status
            .as_deref()
            .and_then(|s| s.parse::<SubTaskStatus>().ok())
            .unwrap_or_default();
        SubTask {
            id: self.id,
            text: self.text,
            completed: self.completed,
            status,
            created_at: parse_timestamp(self.created_at.as_deref()),
            due_date: parse_date(self.due_date.as_deref()),
            notes: self.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fetch_row_with_embedded_sub_tasks() {
        let json = r#"{
            "id": "0b7a4c8e-1d2f-4a3b-9c5d-6e7f8a9b0c1d",
            "user_id": "user-1",
            "text": "Ship release",
            "completed": false,
            "category": "work",
            "priority": true,
            "due_date": "2024-06-01T00:00:00+00:00",
            "notes": null,
            "created_at": "2024-05-20T08:30:00.123456+00:00",
            "sub_tasks": [{
                "id": "1c8b5d9f-2e3a-4b4c-8d6e-7f8a9b0c1d2e",
                "task_id": "0b7a4c8e-1d2f-4a3b-9c5d-6e7f8a9b0c1d",
                "text": "Tag version",
                "completed": true,
                "status": "done",
                "created_at": "2024-05-20T09:00:00+00:00"
            }]
        }"#;
        let row: TaskRow = serde_json::from_str(json).unwrap();
        let task = row.into_task();
        assert_eq!(task.category, Category::Work);
        assert!(task.priority);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(task.sub_tasks.len(), 1);
        assert_eq!(task.sub_tasks[0].status, SubTaskStatus::Done);
    }

    #[test]
    fn test_missing_columns_use_defaults() {
        let json = r#"{"id":"0b7a4c8e-1d2f-4a3b-9c5d-6e7f8a9b0c1d","text":"Bare"}"#;
        let task = serde_json::from_str::<TaskRow>(json).unwrap().into_task();
        assert_eq!(task.category, Category::Personal);
        assert!(!task.priority);
        assert!(task.sub_tasks.is_empty());
    }

    #[test]
    fn test_outgoing_row_is_snake_case() {
        let mut task = Task::new("Plan", Category::Study);
        task.due_date = NaiveDate::from_ymd_opt(2024, 1, 2);
        let value = serde_json::to_value(TaskRow::from_task(&task, "u1")).unwrap();
        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["due_date"], "2024-01-02");
        assert_eq!(value["category"], "study");
        assert!(value.get("sub_tasks").is_none());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_sub_task_status_wire_name() {
        let mut sub = SubTask::new("Step");
        sub.set_status(SubTaskStatus::InProgress);
        let value = serde_json::to_value(SubTaskRow::from_sub_task(&sub, None)).unwrap();
        assert_eq!(value["status"], "inProgress");
        assert!(value.get("task_id").is_none());
    }
}
