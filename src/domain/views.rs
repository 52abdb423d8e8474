use super::task::Task;
use chrono::NaiveDate;
use std::collections::HashSet;
use uuid::Uuid;

/// A flattened row for rendering the task list
#[derive(Debug, Clone)]
pub struct FlatRow {
    /// Index in the flattened list
    pub index: usize,
    /// Depth in the tree (0 = task, 1 = sub-task)
    pub depth: usize,
    /// Whether this is the last sub-task of its task
    pub is_last: bool,
    pub task_index: usize,
    /// Sub-task index (None for task rows)
    pub subtask_index: Option<usize>,
}

/// Flatten tasks and their sub-tasks into rows. Collapsed tasks hide their sub-tasks.
pub fn flatten_tasks(tasks: &[Task], collapsed: &HashSet<Uuid>) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    let mut flat_index = 0;

    for (task_idx, task) in tasks.iter().enumerate() {
        rows.push(FlatRow {
            index: flat_index,
            depth: 0,
            is_last: false,
            task_index: task_idx,
            subtask_index: None,
        });
        flat_index += 1;

        if collapsed.contains(&task.id) {
            continue;
        }
        let count = task.sub_tasks.len();
        for st_idx in 0..count {
            rows.push(FlatRow {
                index: flat_index,
                depth: 1,
                is_last: st_idx == count - 1,
                task_index: task_idx,
                subtask_index: Some(st_idx),
            });
            flat_index += 1;
        }
    }

    rows
}

/// Counts shown in the header and the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub priority_open: usize,
    pub overdue: usize,
    pub due_today: usize,
}

pub fn count_tasks(tasks: &[Task], today: NaiveDate) -> TaskCounts {
    let mut counts = TaskCounts {
        total: tasks.len(),
        ..TaskCounts::default()
    };
    for task in tasks {
        if task.completed {
            counts.completed += 1;
        } else if task.priority {
            counts.priority_open += 1;
        }
        if task.is_overdue(today) {
            counts.overdue += 1;
        }
        if !task.completed && task.is_due_today(today) {
            counts.due_today += 1;
        }
    }
    counts
}

/// Get tree connector for sub-tasks
pub fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}

/// Text progress bar, e.g. `[████░░░░]`
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::Category;

    fn create_test_task(text: &str) -> Task {
        Task::new(text, Category::Personal)
    }

    #[test]
    fn test_flatten_tasks_simple() {
        let tasks = vec![create_test_task("Task 1"), create_test_task("Task 2")];

        let rows = flatten_tasks(&tasks, &HashSet::new());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[1].task_index, 1);
    }

    #[test]
    fn test_flatten_tasks_with_subtasks() {
        let mut task = create_test_task("Parent");
        task.add_sub_task("Sub 1");
        task.add_sub_task("Sub 2");

        let rows = flatten_tasks(&[task], &HashSet::new());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[2].subtask_index, Some(1));
        assert!(!rows[1].is_last);
        assert!(rows[2].is_last);
    }

    #[test]
    fn test_flatten_tasks_collapsed() {
        let mut task = create_test_task("Parent");
        task.add_sub_task("Sub 1");
        let mut collapsed = HashSet::new();
        collapsed.insert(task.id);

        let rows = flatten_tasks(&[task], &collapsed);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_count_tasks() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut a = create_test_task("a");
        a.priority = true;
        a.due_date = Some(today);
        let mut b = create_test_task("b");
        b.due_date = today.pred_opt();
        let mut c = create_test_task("c");
        c.completed = true;
        c.priority = true;

        let counts = count_tasks(&[a, b, c], today);
        assert_eq!(
            counts,
            TaskCounts {
                total: 3,
                completed: 1,
                priority_open: 1,
                overdue: 1,
                due_today: 1,
            }
        );
    }

    #[test]
    fn test_tree_connector() {
        assert_eq!(tree_connector(false), "├─");
        assert_eq!(tree_connector(true), "└─");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[░░░░]");
        assert_eq!(progress_bar(0.5, 4), "[██░░]");
        assert_eq!(progress_bar(1.5, 4), "[████]");
    }
}
