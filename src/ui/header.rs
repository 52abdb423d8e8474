use crate::app::AppState;
use crate::domain::{count_tasks, time_greeting};
use crate::ui::styles::{hint_style, Theme};
use chrono::{Local, Timelike};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_header(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let now = Local::now();
    let counts = count_tasks(app.tasks(), now.date_naive());
    let mood = app.mood.data();

    let mut spans = vec![
        Span::styled(" noteflow ", theme.title()),
        Span::raw(format!("· {} · {} ", time_greeting(now.hour()), now.format("%H:%M"))),
        Span::styled(
            format!("· {} {} ", app.mood.current.symbol(), mood.label),
            theme.accent(),
        ),
        Span::raw(format!(
            "· {}/{} done ",
            counts.completed, counts.total
        )),
    ];
    if counts.overdue > 0 {
        spans.push(Span::raw(format!("· {} overdue ", counts.overdue)));
    }
    spans.push(Span::styled(
        format!("· {} ", app.storage_mode().label()),
        hint_style(),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
