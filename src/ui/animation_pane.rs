use crate::app::AppState;
use crate::domain::AnimationStyle;
use crate::ui::styles::{hint_style, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the animated strip in cells
const STRIP_WIDTH: usize = 18;

pub fn render_animation_pane(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let data = app.mood.data();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(
            format!(" {} {} ", app.mood.current.symbol(), data.label),
            theme.title(),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(STRIP_WIDTH as u16 + 2), Constraint::Min(0)])
        .split(inner);

    let frames = animation_lines(data.animation_style, app.clock.frame());
    let strip: Vec<Line> = frames
        .into_iter()
        .map(|l| Line::from(Span::styled(l, theme.accent())))
        .collect();
    f.render_widget(Paragraph::new(strip).alignment(Alignment::Center), chunks[0]);

    let mut text = vec![Line::raw(data.description)];
    text.push(Line::from(Span::styled(
        format!("♪ {}", data.music_type),
        hint_style(),
    )));
    f.render_widget(Paragraph::new(text), chunks[1]);
}

/// Three rows of ASCII art for the given style and frame
pub fn animation_lines(style: AnimationStyle, frame: usize) -> [String; 3] {
    match style {
        AnimationStyle::Bounce => bounce(frame),
        AnimationStyle::Fade => fade(frame),
        AnimationStyle::Pulse => pulse(frame),
        AnimationStyle::Float => float(frame),
        AnimationStyle::Minimal => minimal(frame),
        AnimationStyle::Playful => playful(frame),
    }
}

fn blank() -> String {
    " ".repeat(STRIP_WIDTH)
}

/// A glyph at column `col` on an otherwise empty row
fn place(glyph: &str, col: usize) -> String {
    let col = col.min(STRIP_WIDTH - 1);
    format!("{}{}{}", " ".repeat(col), glyph, " ".repeat(STRIP_WIDTH - 1 - col))
}

/// Position bouncing back and forth over `len` slots
fn ping_pong(frame: usize, len: usize) -> usize {
    let period = 2 * (len - 1);
    let p = frame % period;
    if p < len {
        p
    } else {
        period - p
    }
}

fn bounce(frame: usize) -> [String; 3] {
    let col = ping_pong(frame, STRIP_WIDTH);
    let row = [2, 1, 0, 1][frame % 4];
    let mut rows = [blank(), blank(), blank()];
    rows[row] = place("●", col);
    rows
}

fn fade(frame: usize) -> [String; 3] {
    const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];
    let level = ping_pong(frame, SHADES.len());
    let row: String = std::iter::repeat(SHADES[level]).take(STRIP_WIDTH).collect();
    [blank(), row, blank()]
}

fn pulse(frame: usize) -> [String; 3] {
    const RINGS: [&str; 4] = ["·", "o", "O", "( O )"];
    let ring = RINGS[ping_pong(frame, RINGS.len())];
    let pad = (STRIP_WIDTH - ring.chars().count()) / 2;
    let centered = format!("{:pad$}{ring}", "", pad = pad);
    [blank(), centered, blank()]
}

fn float(frame: usize) -> [String; 3] {
    let cloud = |offset: usize| place("~", (frame + offset) % STRIP_WIDTH);
    [cloud(0), cloud(7), cloud(13)]
}

fn minimal(frame: usize) -> [String; 3] {
    [blank(), place("·", frame % STRIP_WIDTH), blank()]
}

fn playful(frame: usize) -> [String; 3] {
    const SPARKS: [&str; 4] = ["*", "+", "✦", "+"];
    let spark = |offset: usize| SPARKS[(frame + offset) % SPARKS.len()];
    [
        place(spark(0), (frame * 3) % STRIP_WIDTH),
        place(spark(1), (frame * 5 + 4) % STRIP_WIDTH),
        place(spark(2), (frame * 7 + 9) % STRIP_WIDTH),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_pong() {
        let positions: Vec<usize> = (0..8).map(|f| ping_pong(f, 4)).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 2, 1, 0, 1]);
    }

    #[test]
    fn test_rows_have_strip_width() {
        let styles = [
            AnimationStyle::Bounce,
            AnimationStyle::Fade,
            AnimationStyle::Minimal,
            AnimationStyle::Float,
        ];
        for style in styles {
            for frame in 0..40 {
                for row in animation_lines(style, frame) {
                    assert_eq!(row.chars().count(), STRIP_WIDTH, "{style:?} frame {frame}");
                }
            }
        }
    }

    #[test]
    fn test_animation_changes_between_frames() {
        assert_ne!(
            animation_lines(AnimationStyle::Bounce, 0),
            animation_lines(AnimationStyle::Bounce, 1)
        );
    }
}
