use crate::app::AppState;
use crate::domain::{flatten_tasks, format_due_date, tree_connector, SubTask, Task};
use crate::ui::styles::{
    default_style, done_style, hint_style, overdue_style, priority_style, tag_style, tree_style,
    Theme,
};
use chrono::{Local, NaiveDate};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Render the task list
pub fn render_list_pane(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let today = Local::now().date_naive();
    let tasks = app.tasks();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" Tasks ", theme.title()));

    if tasks.is_empty() {
        let mood = app.mood.data();
        let empty = Paragraph::new(vec![
            Line::raw(""),
            Line::from(Span::styled(mood.empty_state_message, theme.accent())),
            Line::raw(""),
            Line::from(Span::styled(
                format!("Press a: {}", mood.task_placeholder),
                hint_style(),
            )),
        ])
        .wrap(Wrap { trim: false })
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows = flatten_tasks(tasks, &app.collapsed);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let task = &tasks[row.task_index];
            let line = match row.subtask_index.and_then(|i| task.sub_tasks.get(i)) {
                Some(sub) => sub_task_line(sub, row.is_last, today),
                None => task_line(task, app.collapsed.contains(&task.id), today),
            };
            ListItem::new(line)
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected_index.min(rows.len().saturating_sub(1))));

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected());
    f.render_stateful_widget(list, area, &mut state);
}

/// Format: `[x] ★ Write proposal  [work]  2/3  ⏰ Tomorrow`
fn task_line(task: &Task, collapsed: bool, today: NaiveDate) -> Line<'static> {
    let mut spans = Vec::new();

    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    spans.push(Span::raw(checkbox));
    if task.priority {
        spans.push(Span::styled("★ ", priority_style()));
    }

    let text_style = if task.completed {
        done_style()
    } else {
        default_style()
    };
    spans.push(Span::styled(task.text.clone(), text_style));
    spans.push(Span::styled(format!("  [{}]", task.category.name()), tag_style()));

    if !task.sub_tasks.is_empty() {
        let marker = if collapsed { " ▸" } else { "" };
        spans.push(Span::raw(format!(
            "  {}/{}{}",
            task.completed_sub_tasks(),
            task.sub_tasks.len(),
            marker
        )));
    }

    if let Some(due) = task.due_date {
        let style = if task.is_overdue(today) {
            overdue_style()
        } else {
            hint_style()
        };
        spans.push(Span::styled(format!("  ⏰ {}", format_due_date(due, today)), style));
    }

    if task.notes.is_some() {
        spans.push(Span::styled("  ✎", hint_style()));
    }

    Line::from(spans)
}

fn sub_task_line(sub: &SubTask, is_last: bool, today: NaiveDate) -> Line<'static> {
    let mut spans = vec![
        Span::styled("    ", tree_style()),
        Span::styled(tree_connector(is_last), tree_style()),
        Span::raw(format!(" {} ", sub.status.symbol())),
    ];
    let style = if sub.completed {
        done_style()
    } else {
        default_style()
    };
    spans.push(Span::styled(sub.text.clone(), style));
    if let Some(due) = sub.due_date {
        spans.push(Span::styled(format!("  ⏰ {}", format_due_date(due, today)), hint_style()));
    }
    Line::from(spans)
}
