use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub header_area: Rect,
    pub list_area: Rect,
    pub details_area: Rect,
    pub timer_area: Rect,
    pub music_area: Rect,
    pub animation_area: Rect,
    pub keybindings_area: Rect,
}

/// Create the main layout
/// - Top: header (1 row)
/// - Main: List (60%) | right column with details, timer and music
/// - Bottom: animation strip, then the hint/message bar (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(5), // Animation strip
            Constraint::Length(1), // Keybindings / messages
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Details
            Constraint::Length(6), // Timer
            Constraint::Length(7), // Music
        ])
        .split(columns[1]);

    MainLayout {
        header_area: rows[0],
        list_area: columns[0],
        details_area: right[0],
        timer_area: right[1],
        music_area: right[2],
        animation_area: rows[2],
        keybindings_area: rows[3],
    }
}

/// Centered modal with a fixed height and 60% width
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

/// Large centered overlay for chat, documents and focus mode
pub fn create_overlay_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(5),
            Constraint::Percentage(90),
            Constraint::Percentage(5),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(8),
            Constraint::Percentage(84),
            Constraint::Percentage(8),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
