use crate::app::{AppState, MessageKind};
use crate::domain::UiMode;
use crate::ui::styles::{error_style, hint_style, success_style, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Key hints for the active mode
pub fn hints_for(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Normal => {
            " ↑/↓ select  Enter done  a add  A sub  e edit  n/N notes  D due  p prio  c cat  s status  d del  u undo  f focus  m mood  t timer  T settings  P play  / search  o docs  i chat  ? help  q quit"
        }
        UiMode::MoodSelector => " ↑/↓ choose  Enter/1-6 set mood  Esc cancel",
        UiMode::TimerSettings => {
            " f/b presets  F/B custom  a auto-break  s sound  t tone  +/- volume  Space start/pause  r reset  Esc back"
        }
        UiMode::Documents => {
            " ↑/↓ document  o open  ←/→ page  +/- zoom  r rotate  0 reset  Enter external  x close  Esc back"
        }
        UiMode::Focus => {
            " ↑/↓ step  Space done  s status  a add  d del  n notes  1-4 ask  ? custom  A add suggestions  T/M/I panels  Esc exit"
        }
        UiMode::Chat => " Enter send  Ctrl+L clear  Esc close",
        UiMode::MusicSearch => " Enter search  ↑/↓ results  Enter on empty plays  Esc close",
        UiMode::AddingTask => " Enter save  Tab category  Esc cancel",
        UiMode::Help => " any key to close",
        _ => " Enter save  Esc cancel",
    }
}

/// Render the bottom bar: the newest status message, or key hints
pub fn render_keybindings(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let line = match app.current_message() {
        Some(msg) => {
            let style = match msg.kind {
                MessageKind::Info => theme.accent(),
                MessageKind::Success => success_style(),
                MessageKind::Error => error_style(),
            };
            Line::from(Span::styled(format!(" {}", msg.text), style))
        }
        None => Line::from(Span::styled(hints_for(app.ui_mode), hint_style())),
    };
    f.render_widget(Paragraph::new(line), area);
}
