use crate::domain::{count_tasks, Category, Task, TaskCounts};
use crate::persistence::FocusSession;
use chrono::NaiveDate;

/// Task totals as of a date
#[derive(Debug, Default, PartialEq)]
pub struct TaskStats {
    pub counts: TaskCounts,
    pub pending: usize,
    pub sub_task_total: usize,
    pub sub_task_completed: usize,
}

impl TaskStats {
    pub fn completion_percent(&self) -> f64 {
        percent(self.counts.completed, self.counts.total)
    }

    pub fn sub_task_percent(&self) -> f64 {
        percent(self.sub_task_completed, self.sub_task_total)
    }
}

/// Per-category statistics
#[derive(Debug, PartialEq)]
pub struct CategoryStats {
    pub category: Category,
    pub total: usize,
    pub completed: usize,
}

/// Pomodoro focus phases finished on one day
#[derive(Debug, Default, PartialEq)]
pub struct FocusStats {
    pub sessions: usize,
    pub minutes: u32,
    /// Distinct task names, in first-seen order
    pub tasks: Vec<String>,
}

pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn calculate_task_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let counts = count_tasks(tasks, today);
    let pending = counts.total - counts.completed;
    let sub_task_total = tasks.iter().map(|t| t.sub_tasks.len()).sum();
    let sub_task_completed = tasks.iter().map(|t| t.completed_sub_tasks()).sum();
    TaskStats {
        counts,
        pending,
        sub_task_total,
        sub_task_completed,
    }
}

/// One entry per category, including empty ones
pub fn calculate_category_stats(tasks: &[Task]) -> Vec<CategoryStats> {
    Category::all()
        .iter()
        .map(|&category| {
            let in_category = tasks.iter().filter(|t| t.category == category);
            let (total, completed) = in_category.fold((0, 0), |(total, done), t| {
                (total + 1, done + usize::from(t.completed))
            });
            CategoryStats {
                category,
                total,
                completed,
            }
        })
        .collect()
}

pub fn calculate_focus_stats(sessions: &[&FocusSession]) -> FocusStats {
    let mut stats = FocusStats {
        sessions: sessions.len(),
        ..FocusStats::default()
    };
    for session in sessions {
        stats.minutes += session.minutes;
        if let Some(task) = &session.task {
            if !stats.tasks.contains(task) {
                stats.tasks.push(task.clone());
            }
        }
    }
    stats
}
