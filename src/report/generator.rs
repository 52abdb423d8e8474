use crate::domain::{format_due_date, Task};
use crate::persistence::{
    load_settings, report_file, LocalTaskStore, Settings, SETTINGS_FILE, TASKS_FILE,
};
use crate::report::stats::{
    calculate_category_stats, calculate_focus_stats, calculate_task_stats, percent,
};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

fn format_minutes(total: u32) -> String {
    if total < 60 {
        format!("{total}m")
    } else if total % 60 == 0 {
        format!("{}h", total / 60)
    } else {
        format!("{}h {}m", total / 60, total % 60)
    }
}

fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

fn task_line(report: &mut String, task: &Task, date: NaiveDate) {
    let check = if task.completed { "x" } else { " " };
    let star = if task.priority { " ★" } else { "" };
    let due = task
        .due_date
        .map(|d| {
            let label = format_due_date(d, date);
            if task.is_overdue(date) {
                format!(" (due {label}, overdue)")
            } else {
                format!(" (due {label})")
            }
        })
        .unwrap_or_default();
    let _ = writeln!(report, "- [{check}] **{}**{star} _{}_{due}", task.text, task.category);
    for sub in &task.sub_tasks {
        let _ = writeln!(report, "    - {} {}", sub.status.symbol(), sub.text);
    }
}

/// Markdown summary of the task list and the day's focus sessions
pub fn render_report(date: NaiveDate, tasks: &[Task], settings: &Settings) -> String {
    let stats = calculate_task_stats(tasks, date);
    let categories = calculate_category_stats(tasks);
    let focus = calculate_focus_stats(&settings.sessions_on(date));

    let mut report = String::new();
    let _ = writeln!(report, "# NoteFlow Report - {date}\n");

    report.push_str("## Summary\n\n");
    let _ = writeln!(
        report,
        "- **Total Tasks:** {} (Completed: {}, Pending: {})",
        stats.counts.total, stats.counts.completed, stats.pending
    );
    let _ = writeln!(
        report,
        "- **Completion Rate:** {}",
        format_percent(stats.completion_percent())
    );
    let _ = writeln!(report, "- **Priority Open:** {}", stats.counts.priority_open);
    let _ = writeln!(report, "- **Overdue:** {}", stats.counts.overdue);
    let _ = writeln!(report, "- **Due Today:** {}", stats.counts.due_today);
    let _ = writeln!(
        report,
        "- **Sub-tasks:** {}/{} done ({})\n",
        stats.sub_task_completed,
        stats.sub_task_total,
        format_percent(stats.sub_task_percent())
    );

    report.push_str("## Categories\n\n");
    for cat in &categories {
        let _ = writeln!(
            report,
            "- **{}:** {}/{} done ({})",
            cat.category,
            cat.completed,
            cat.total,
            format_percent(percent(cat.completed, cat.total))
        );
    }
    report.push('\n');

    report.push_str("## Focus Sessions\n\n");
    if focus.sessions == 0 {
        report.push_str("No focus sessions recorded.\n\n");
    } else {
        let _ = writeln!(
            report,
            "- **Sessions:** {} ({} focused)",
            focus.sessions,
            format_minutes(focus.minutes)
        );
        if !focus.tasks.is_empty() {
            let _ = writeln!(report, "- **Worked on:** {}", focus.tasks.join(", "));
        }
        report.push('\n');
    }

    let (pending, completed): (Vec<&Task>, Vec<&Task>) = tasks.iter().partition(|t| !t.completed);
    if !pending.is_empty() {
        report.push_str("## Pending Tasks\n\n");
        for task in pending {
            task_line(&mut report, task, date);
        }
        report.push('\n');
    }
    if !completed.is_empty() {
        report.push_str("## Completed Tasks\n\n");
        for task in completed {
            task_line(&mut report, task, date);
        }
        report.push('\n');
    }

    report
}

/// Write the report for `date` (default today) and return its path
pub fn generate_report(
    data_dir: &Path,
    date: Option<NaiveDate>,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let report_date = date.unwrap_or_else(|| Local::now().date_naive());

    let tasks = LocalTaskStore::new(data_dir.join(TASKS_FILE)).load()?;
    let settings = load_settings(data_dir.join(SETTINGS_FILE))?;
    let report = render_report(report_date, &tasks, &settings);

    let output = output_path.unwrap_or_else(|| report_file(data_dir, report_date));
    fs::write(&output, report)
        .with_context(|| format!("Failed to write report: {}", output.display()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::persistence::save_settings;
    use tempfile::tempdir;

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(95), "1h 35m");
    }

    #[test]
    fn test_render_sections() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let mut open = Task::new("Draft proposal", Category::Work);
        open.toggle_priority();
        open.due_date = date.pred_opt();
        open.add_sub_task("Outline");
        let mut done = Task::new("Gym", Category::Personal);
        done.toggle_complete();

        let report = render_report(date, &[open, done], &Settings::default());
        assert!(report.starts_with("# NoteFlow Report - 2024-04-15"));
        assert!(report.contains("- **Total Tasks:** 2 (Completed: 1, Pending: 1)"));
        assert!(report.contains("- **Overdue:** 1"));
        assert!(report.contains("- **work:** 0/1 done (0.0%)"));
        assert!(report.contains("No focus sessions recorded."));
        assert!(report.contains("- [ ] **Draft proposal** ★ _work_"));
        assert!(report.contains("overdue)"));
        assert!(report.contains("    - [ ] Outline"));
        assert!(report.contains("## Completed Tasks\n\n- [x] **Gym** _personal_"));
    }

    #[test]
    fn test_generate_report_writes_default_path() {
        let dir = tempdir().unwrap();
        LocalTaskStore::new(dir.path().join(TASKS_FILE))
            .save(&[Task::new("Read", Category::Study)])
            .unwrap();
        let mut settings = Settings::default();
        settings.record_focus_session(25, Some("Read".into()));
        save_settings(dir.path().join(SETTINGS_FILE), &settings).unwrap();

        let today = Local::now().date_naive();
        let path = generate_report(dir.path(), None, None).unwrap();
        assert_eq!(path, report_file(dir.path(), today));

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("- **Sessions:** 1 (25m focused)"));
        assert!(content.contains("- **Worked on:** Read"));
    }
}
