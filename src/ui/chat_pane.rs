use crate::ai::Role;
use crate::app::AppState;
use crate::ui::{
    layout::create_overlay_area,
    styles::{hint_style, modal_title_style, Theme},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the AI chat overlay: conversation above, input line below
pub fn render_chat(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let overlay = create_overlay_area(area);
    f.render_widget(Clear, overlay);

    let title = if app.chat.using_fallback() {
        " AI Assistant (fallback) "
    } else {
        " AI Assistant "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(title, theme.title()));
    let inner = block.inner(overlay);
    f.render_widget(block, overlay);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    let mut lines = Vec::new();
    for message in app.chat.history() {
        let (who, style) = match message.role {
            Role::User => ("You", theme.accent()),
            Role::Assistant => ("AI", theme.title()),
            Role::System => continue,
        };
        lines.push(Line::from(Span::styled(format!("{who}:"), style)));
        for text_line in message.content.lines() {
            lines.push(Line::raw(format!("  {text_line}")));
        }
        lines.push(Line::raw(""));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask for help planning, prioritising or getting unstuck.",
            hint_style(),
        )));
    }
    if app.chat.is_pending() {
        lines.push(Line::from(Span::styled("AI is thinking…", hint_style())));
    }

    // Keep the newest messages in view
    let height = chunks[0].height as usize;
    let scroll = lines.len().saturating_sub(height) as u16;
    let conversation = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(conversation, chunks[0]);

    let input = Paragraph::new(Line::from(vec![
        Span::raw("> "),
        Span::styled(app.input.clone(), modal_title_style()),
        Span::styled("█", modal_title_style()),
    ]))
    .block(Block::default().borders(Borders::TOP).border_style(theme.border()));
    f.render_widget(input, chunks[1]);
}
