use crate::app::AppState;
use crate::domain::progress_bar;
use crate::ui::{
    layout::create_overlay_area,
    music_pane::render_music_pane,
    styles::{default_style, done_style, hint_style, Theme},
    timer_pane::render_timer_pane,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Render the focus-mode overlay for the focused task
pub fn render_focus(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let Some(task) = app.focus_task() else {
        return;
    };
    let focus_mode = &app.settings.focus_mode;
    let overlay = create_overlay_area(area);
    f.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" Focus Mode ", theme.title()));
    let inner = block.inner(overlay);
    f.render_widget(block, overlay);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if focus_mode.enable_ai {
            [Constraint::Percentage(55), Constraint::Percentage(45)]
        } else {
            [Constraint::Percentage(100), Constraint::Percentage(0)]
        })
        .split(inner);

    let side_height = |enabled: bool, h: u16| if enabled { h } else { 0 };
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(5),
            Constraint::Length(side_height(focus_mode.show_timer, 6)),
            Constraint::Length(side_height(focus_mode.enable_music, 7)),
        ])
        .split(columns[0]);

    // Title and progress
    let header = vec![
        Line::from(Span::styled(task.text.clone(), theme.title())),
        Line::from(vec![
            Span::styled(progress_bar(task.progress(), 20), theme.accent()),
            Span::raw(format!(
                " {}/{} steps",
                task.completed_sub_tasks(),
                task.sub_tasks.len()
            )),
        ]),
    ];
    f.render_widget(Paragraph::new(header), left[0]);

    // Sub-tasks
    let selected = app.focus.as_ref().map(|s| s.sub_index).unwrap_or(0);
    let items: Vec<ListItem> = task
        .sub_tasks
        .iter()
        .map(|sub| {
            let style = if sub.completed {
                done_style()
            } else {
                default_style()
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", sub.status.symbol())),
                Span::styled(sub.text.clone(), style),
            ]))
        })
        .collect();
    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(selected.min(items.len() - 1)));
    }
    let empty = items.is_empty();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled(" Steps ", theme.title())),
        )
        .highlight_style(theme.selected());
    if empty {
        let hint = Paragraph::new(Span::styled(
            "No steps yet. Press a to add one, or 2 to ask for a breakdown.",
            hint_style(),
        ))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled(" Steps ", theme.title())),
        );
        f.render_widget(hint, left[1]);
    } else {
        f.render_stateful_widget(list, left[1], &mut state);
    }

    // Notes
    let notes = Paragraph::new(task.notes.clone().unwrap_or_else(|| "(no notes)".into()))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled(" Notes ", theme.title())),
        );
    f.render_widget(notes, left[2]);

    if focus_mode.show_timer {
        render_timer_pane(f, &app.pomodoro, theme, left[3]);
    }
    if focus_mode.enable_music {
        render_music_pane(f, &app.player, theme, left[4]);
    }

    if focus_mode.enable_ai {
        render_assistant(f, app, theme, columns[1]);
    }
}

fn render_assistant(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let assist = &app.assist;
    let mut lines = vec![
        Line::from(Span::styled(
            "1 stuck · 2 break down · 3 motivate · 4 research · ? ask",
            hint_style(),
        )),
        Line::raw(""),
    ];

    if assist.is_pending() {
        lines.push(Line::from(Span::styled("Thinking…", hint_style())));
    } else if let Some(response) = assist.response() {
        for text_line in response.lines() {
            lines.push(Line::raw(text_line.to_string()));
        }
    }

    if !assist.suggestions().is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{} potential sub-tasks. Press A to add them.",
                assist.suggestions().len()
            ),
            theme.accent(),
        )));
    }

    let title = if assist.using_fallback() {
        " Assistant (fallback) "
    } else {
        " Assistant "
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled(title, theme.title())),
        );
    f.render_widget(paragraph, area);
}
