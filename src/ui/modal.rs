use crate::app::AppState;
use crate::domain::Mood;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style, Theme},
    timer_pane::timer_lines,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

fn modal_block(title: String, style: Style) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, modal_title_style()))
        .style(style)
}

/// Render the mood selector
pub fn render_mood_selector(f: &mut Frame, app: &AppState, area: Rect) {
    let moods = Mood::all();
    let modal_area = create_modal_area(area, moods.len() as u16 * 2 + 6);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw(""), Line::raw("  How are you feeling?"), Line::raw("")];
    for (idx, mood) in moods.iter().enumerate() {
        let data = mood.data();
        let marker = if idx == app.mood_cursor { "›" } else { " " };
        let current = if *mood == app.mood.current {
            " ← Current"
        } else {
            ""
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker}[{}] ", idx + 1), modal_title_style()),
            Span::raw(format!("{} ", mood.symbol())),
            Span::styled(data.label, Theme::from_mood(data).title()),
            Span::raw(current),
        ]));
        lines.push(Line::from(Span::styled(
            format!("       {}", data.description),
            hint_style(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Set Mood ".into(), modal_bg_style()))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}

/// Quote shown for a few seconds after the mood changes
pub fn render_quote_popup(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let Some(quote) = app.mood.visible_quote(Instant::now()) else {
        return;
    };
    let modal_area = create_modal_area(area, 5);
    f.render_widget(Clear, modal_area);
    let paragraph = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(format!("  \"{quote}\""), theme.accent())),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled(
                format!(" {} {} ", app.mood.current.symbol(), app.mood.data().label),
                theme.title(),
            )),
    )
    .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}

/// Render the pomodoro settings panel
pub fn render_timer_settings(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let modal_area = create_modal_area(area, 16);
    f.render_widget(Clear, modal_area);

    let settings = &app.pomodoro.settings;
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    let row = |key: &'static str, label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("  [{key}] "), modal_title_style()),
            Span::raw(format!("{label:<18}")),
            Span::raw(value),
        ])
    };

    let mut lines = vec![Line::raw("")];
    lines.extend(timer_lines(&app.pomodoro, theme));
    lines.push(Line::raw(""));
    lines.push(row("f/F", "Focus length", format!("{} min", settings.focus_minutes)));
    lines.push(row("b/B", "Break length", format!("{} min", settings.break_minutes)));
    lines.push(row("a", "Auto-start breaks", on_off(settings.auto_start_breaks).into()));
    lines.push(row("s", "Sound", on_off(settings.sound_enabled).into()));
    lines.push(row("t", "Alarm tone", settings.alarm_tone.name().into()));
    lines.push(row("+/-", "Alarm volume", format!("{}%", settings.alarm_volume)));

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Timer Settings ".into(), modal_bg_style()))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}

const HELP: &[(&str, &str)] = &[
    ("↑/↓ j/k", "Move selection"),
    ("Space", "Collapse / expand sub-tasks"),
    ("Enter x", "Complete task or sub-task"),
    ("a / A", "Add task / sub-task"),
    ("e", "Rename"),
    ("n / N", "Edit notes inline / in $EDITOR"),
    ("D", "Due date"),
    ("p / c / s", "Priority / category / sub-task status"),
    ("d u", "Delete / undo delete"),
    ("f", "Focus mode"),
    ("m", "Choose mood"),
    ("t r T", "Start-pause / reset / timer settings"),
    ("P > <", "Play-pause / next / previous track"),
    ("+ - M", "Volume / mute"),
    ("z R l", "Shuffle / repeat / like"),
    ("/", "Search music"),
    ("o", "Documents"),
    ("i", "AI chat"),
    ("q Ctrl+C", "Quit"),
];

pub fn render_help(f: &mut Frame, area: Rect) {
    let modal_area = create_modal_area(area, HELP.len() as u16 + 4);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    for (keys, action) in HELP {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<10}"), modal_title_style()),
            Span::raw(*action),
        ]));
    }
    let paragraph = Paragraph::new(lines).block(modal_block(" Help ".into(), modal_bg_style()));
    f.render_widget(paragraph, modal_area);
}
