use crate::app::AppState;
use crate::domain::{format_due_date, progress_bar};
use crate::ui::styles::{default_style, hint_style, Theme};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected item
pub fn render_details_pane(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" Details ", theme.title()));

    let Some((task_idx, sub_idx)) = app.get_selected_item() else {
        f.render_widget(Paragraph::new("No task selected").block(block), area);
        return;
    };
    let Some(task) = app.tasks().get(task_idx) else {
        return;
    };
    let today = Local::now().date_naive();
    let label = |text: &'static str| Span::styled(text, theme.title());

    let mut lines = Vec::new();
    match sub_idx.and_then(|i| task.sub_tasks.get(i)) {
        Some(sub) => {
            lines.push(Line::from(vec![label("Sub-task: "), Span::raw(sub.text.clone())]));
            lines.push(Line::from(vec![label("Of:       "), Span::raw(task.text.clone())]));
            lines.push(Line::from(vec![label("Status:   "), Span::raw(sub.status.name())]));
            if let Some(due) = sub.due_date {
                lines.push(Line::from(vec![
                    label("Due:      "),
                    Span::raw(format_due_date(due, today)),
                ]));
            }
            lines.push(Line::raw(""));
            push_notes(&mut lines, sub.notes.as_deref(), theme);
        }
        None => {
            lines.push(Line::from(vec![label("Task:     "), Span::raw(task.text.clone())]));
            lines.push(Line::from(vec![
                label("Category: "),
                Span::raw(task.category.to_string()),
            ]));
            let status = if task.completed { "done" } else { "open" };
            let priority = if task.priority { " · priority" } else { "" };
            lines.push(Line::from(vec![
                label("Status:   "),
                Span::raw(format!("{status}{priority}")),
            ]));
            if let Some(due) = task.due_date {
                let overdue = if task.is_overdue(today) { " (overdue)" } else { "" };
                lines.push(Line::from(vec![
                    label("Due:      "),
                    Span::raw(format!("{}{overdue}", format_due_date(due, today))),
                ]));
            }
            if !task.sub_tasks.is_empty() {
                lines.push(Line::from(vec![
                    label("Progress: "),
                    Span::styled(progress_bar(task.progress(), 12), theme.accent()),
                    Span::raw(format!(
                        " {}/{}",
                        task.completed_sub_tasks(),
                        task.sub_tasks.len()
                    )),
                ]));
            }
            lines.push(Line::from(vec![
                label("Created:  "),
                Span::raw(
                    task.created_at
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                ),
            ]));
            lines.push(Line::raw(""));
            push_notes(&mut lines, task.notes.as_deref(), theme);
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn push_notes(lines: &mut Vec<Line<'static>>, notes: Option<&str>, theme: &Theme) {
    match notes {
        Some(notes) => {
            lines.push(Line::from(Span::styled("Notes:", theme.title())));
            for note_line in notes.lines() {
                lines.push(Line::styled(format!("  {note_line}"), default_style()));
            }
        }
        None => lines.push(Line::from(Span::styled("Notes: (empty)", hint_style()))),
    }
}
