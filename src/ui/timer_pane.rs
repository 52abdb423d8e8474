use crate::domain::{progress_bar, Pomodoro};
use crate::ui::styles::{hint_style, Theme};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn timer_lines(pomodoro: &Pomodoro, theme: &Theme) -> Vec<Line<'static>> {
    let state = if pomodoro.running {
        "running"
    } else if pomodoro.active {
        "paused"
    } else {
        "ready"
    };
    vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", pomodoro.display()),
                theme.title().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} · {state}", pomodoro.phase.label())),
        ]),
        Line::from(Span::styled(
            progress_bar(pomodoro.progress(), 24),
            theme.accent(),
        )),
        Line::from(Span::styled(
            format!(
                "focus {}m · break {}m{}",
                pomodoro.settings.focus_minutes,
                pomodoro.settings.break_minutes,
                if pomodoro.settings.auto_start_breaks {
                    " · auto"
                } else {
                    ""
                }
            ),
            hint_style(),
        )),
    ]
}

/// Render the pomodoro pane
pub fn render_timer_pane(f: &mut Frame, pomodoro: &Pomodoro, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" Pomodoro ", theme.title()));
    f.render_widget(Paragraph::new(timer_lines(pomodoro, theme)).block(block), area);
}
