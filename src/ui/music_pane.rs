use crate::domain::Player;
use crate::ui::styles::{hint_style, priority_style, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn music_lines(player: &Player, theme: &Theme) -> Vec<Line<'static>> {
    let Some(video) = player.current_video() else {
        return vec![Line::from(Span::styled("Nothing queued. / to search", hint_style()))];
    };

    let state = if player.playing { "▶" } else { "⏸" };
    let heart = if player.is_liked(&video.id) { " ♥" } else { "" };
    let volume = if player.muted {
        "muted".to_string()
    } else {
        format!("vol {}%", player.volume)
    };
    let mut flags = Vec::new();
    if player.shuffle {
        flags.push("shuffle");
    }
    if player.repeat {
        flags.push("repeat");
    }

    vec![
        Line::from(vec![
            Span::styled(format!("{state} "), theme.title()),
            Span::raw(video.title.clone()),
            Span::styled(heart.to_string(), priority_style()),
        ]),
        Line::from(Span::styled(video.channel.clone(), theme.accent())),
        Line::from(Span::styled(
            format!(
                "{volume} · {}/{}{}{}",
                player.current.map(|i| i + 1).unwrap_or(0),
                player.queue.len(),
                if flags.is_empty() { "" } else { " · " },
                flags.join(" ")
            ),
            hint_style(),
        )),
    ]
}

/// Render the music pane
pub fn render_music_pane(f: &mut Frame, player: &Player, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" Music ", theme.title()));
    f.render_widget(Paragraph::new(music_lines(player, theme)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Mood, Video};

    #[test]
    fn test_music_lines_empty_player() {
        let theme = Theme::from_mood(Mood::Focused.data());
        let lines = music_lines(&Player::default(), &theme);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_music_lines_show_like() {
        let theme = Theme::from_mood(Mood::Focused.data());
        let mut player = Player::default();
        player.select(Video::direct("dQw4w9WgXcQ"));
        player.toggle_like("dQw4w9WgXcQ");
        let first: String = music_lines(&player, &theme)[0]
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(first.starts_with("▶ "));
        assert!(first.ends_with(" ♥"));
    }
}
