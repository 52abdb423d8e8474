use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style, Theme},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Maximum search results shown under the query
const MAX_RESULTS: usize = 8;

/// Render the single-line input form for the active text-entry mode
pub fn render_input_form(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let mut lines = vec![Line::raw("")];

    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(app.input.clone(), modal_title_style()),
        Span::styled("█", modal_title_style()),
    ]));
    lines.push(Line::raw(""));

    match app.ui_mode {
        UiMode::AddingTask => {
            lines.push(Line::from(vec![
                Span::raw("Category: "),
                Span::styled(app.new_task_category.to_string(), theme.accent()),
                Span::styled("  (Tab to change)", hint_style()),
            ]));
            if app.input.is_empty() {
                lines.push(Line::from(Span::styled(
                    app.mood.data().task_placeholder,
                    hint_style(),
                )));
            }
        }
        UiMode::MusicSearch => push_search_lines(&mut lines, app, theme),
        _ => {}
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Enter to submit  ·  Esc to cancel",
        hint_style(),
    )));

    let modal_area = create_modal_area(area, lines.len() as u16 + 2);
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", app.ui_mode.prompt()),
                    modal_title_style(),
                ))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn push_search_lines(lines: &mut Vec<Line<'static>>, app: &AppState, theme: &Theme) {
    if app.search_results.is_empty() {
        if !app.settings.recent_searches.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Recent: {}", app.settings.recent_searches.join(", ")),
                hint_style(),
            )));
        }
        return;
    }

    let start = app.search_cursor.saturating_sub(MAX_RESULTS - 1);
    for (idx, video) in app
        .search_results
        .iter()
        .enumerate()
        .skip(start)
        .take(MAX_RESULTS)
    {
        let line = format!("{} - {}", video.title, video.channel);
        if idx == app.search_cursor {
            lines.push(Line::from(Span::styled(format!("› {line}"), theme.selected())));
        } else {
            lines.push(Line::raw(format!("  {line}")));
        }
    }
    lines.push(Line::from(Span::styled(
        "↑/↓ choose · clear the query and press Enter to play",
        hint_style(),
    )));
}
