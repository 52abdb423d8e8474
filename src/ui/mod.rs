pub mod animation_pane;
pub mod chat_pane;
pub mod details_pane;
pub mod documents_pane;
pub mod focus_pane;
pub mod header;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod music_pane;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use animation_pane::render_animation_pane;
use chat_pane::render_chat;
use details_pane::render_details_pane;
use documents_pane::render_documents;
use focus_pane::render_focus;
use header::render_header;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_help, render_mood_selector, render_quote_popup, render_timer_settings};
use music_pane::render_music_pane;
use ratatui::Frame;
use styles::Theme;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);
    let theme = Theme::from_mood(app.mood.data());

    render_header(f, app, &theme, layout.header_area);
    render_list_pane(f, app, &theme, layout.list_area);
    render_details_pane(f, app, &theme, layout.details_area);
    render_timer_pane(f, &app.pomodoro, &theme, layout.timer_area);
    render_music_pane(f, &app.player, &theme, layout.music_area);
    render_animation_pane(f, app, &theme, layout.animation_area);
    render_keybindings(f, app, &theme, layout.keybindings_area);

    // Overlays
    if app.ui_mode.in_focus() {
        render_focus(f, app, &theme, size);
    }
    match app.ui_mode {
        UiMode::Help => render_help(f, size),
        UiMode::MoodSelector => render_mood_selector(f, app, size),
        UiMode::TimerSettings | UiMode::EditingFocusMinutes | UiMode::EditingBreakMinutes => {
            render_timer_settings(f, app, &theme, size)
        }
        UiMode::Chat => render_chat(f, app, &theme, size),
        UiMode::Documents | UiMode::OpeningDocument => render_documents(f, app, &theme, size),
        _ => {}
    }

    // Input form goes on top of whatever opened it
    if app.ui_mode.is_text_entry() && app.ui_mode != UiMode::Chat {
        render_input_form(f, app, &theme, size);
    }

    if app.ui_mode == UiMode::Normal {
        render_quote_popup(f, app, &theme, size);
    }
}
