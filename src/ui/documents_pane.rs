use crate::app::AppState;
use crate::domain::{progress_bar, Document};
use crate::ui::{
    layout::create_overlay_area,
    styles::{hint_style, Theme},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn format_size(bytes: u64) -> String {
    match bytes {
        b if b >= 1024 * 1024 => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
        b if b >= 1024 => format!("{:.1} KB", b as f64 / 1024.0),
        b => format!("{b} B"),
    }
}

/// Render the documents overlay: opened PDFs on the left, viewer state on the right
pub fn render_documents(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let overlay = create_overlay_area(area);
    f.render_widget(Clear, overlay);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(overlay);

    let items: Vec<ListItem> = app
        .shelf
        .documents
        .iter()
        .map(|doc| ListItem::new(format!("{} ({})", doc.name, format_size(doc.size))))
        .collect();
    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app.doc_cursor.min(items.len() - 1)));
    }
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled(" Documents ", theme.title())),
        )
        .highlight_style(theme.selected());
    f.render_stateful_widget(list, chunks[0], &mut state);

    let lines = match app.shelf.current() {
        Some(doc) => viewer_lines(doc, theme),
        None => vec![
            Line::raw(""),
            Line::from(Span::styled("No document open. Press o to open a PDF.", hint_style())),
        ],
    };
    let viewer = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled(" Viewer ", theme.title())),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(viewer, chunks[1]);
}

fn viewer_lines(doc: &Document, theme: &Theme) -> Vec<Line<'static>> {
    let ratio = if doc.pages > 0 {
        doc.page as f64 / doc.pages as f64
    } else {
        0.0
    };
    vec![
        Line::from(Span::styled(doc.name.clone(), theme.title())),
        Line::from(Span::styled(doc.path.display().to_string(), hint_style())),
        Line::raw(""),
        Line::raw(format!("Page {} of {}", doc.page, doc.pages)),
        Line::from(Span::styled(progress_bar(ratio, 20), theme.accent())),
        Line::raw(format!("Zoom {}% · Rotation {}°", doc.zoom, doc.rotation)),
        Line::raw(""),
        Line::from(Span::styled(
            "Enter opens the file in the system viewer",
            hint_style(),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
