use crate::ai::AssistPrompt;
use crate::app::AppState;
use crate::domain::{Mood, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::env;
use std::fs;
use std::process::Command;
use tempfile::NamedTempFile;

const ALARM_VOLUME_STEP: i32 = 10;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Help => {
            app.ui_mode = UiMode::Normal;
            Ok(false)
        }
        UiMode::MoodSelector => handle_mood_selector_mode(app, key),
        UiMode::TimerSettings => handle_timer_settings_mode(app, key),
        UiMode::Documents => handle_documents_mode(app, key),
        UiMode::Focus => handle_focus_mode(app, key),
        UiMode::Chat => handle_chat_mode(app, key),
        UiMode::MusicSearch => handle_music_search_mode(app, key),
        UiMode::AddingTask => handle_add_task_mode(app, key),
        mode if mode.is_text_entry() => handle_text_entry(app, key),
        _ => Ok(false),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Char(' ') => app.toggle_expand(),

        // Tasks
        KeyCode::Enter | KeyCode::Char('x') => app.toggle_complete_selected()?,
        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Char('A') => app.start_add_subtask(),
        KeyCode::Char('e') => app.start_rename(),
        KeyCode::Char('n') => app.start_edit_notes(),
        KeyCode::Char('N') => {
            if app.selected_task_notes().is_some() {
                app.external_edit_requested = true;
            }
        }
        KeyCode::Char('D') => app.start_edit_due_date(),
        KeyCode::Char('p') => app.toggle_priority_selected()?,
        KeyCode::Char('c') => app.cycle_category_selected()?,
        KeyCode::Char('s') => app.cycle_status_selected()?,
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected()?,
        KeyCode::Char('u') => app.undo()?,
        KeyCode::Char('f') => app.enter_focus(),

        // Mood
        KeyCode::Char('m') => app.open_mood_selector(),

        // Timer
        KeyCode::Char('t') => app.toggle_timer(),
        KeyCode::Char('r') => app.reset_timer(),
        KeyCode::Char('T') => app.ui_mode = UiMode::TimerSettings,

        // Music
        KeyCode::Char('P') => app.toggle_play(),
        KeyCode::Char('>') => app.next_track(),
        KeyCode::Char('<') => app.prev_track(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_volume(true),
        KeyCode::Char('-') | KeyCode::Char('_') => app.adjust_volume(false),
        KeyCode::Char('M') => app.toggle_mute(),
        KeyCode::Char('z') => app.toggle_shuffle(),
        KeyCode::Char('R') => app.toggle_repeat(),
        KeyCode::Char('l') => app.toggle_like(),
        KeyCode::Char('/') => app.open_music_search(),

        // Panels
        KeyCode::Char('o') => app.open_documents(),
        KeyCode::Char('i') => app.open_chat(),
        KeyCode::Char('?') => app.ui_mode = UiMode::Help,

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in the mood selector
fn handle_mood_selector_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.mood_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.mood_cursor_down(),
        KeyCode::Enter => app.confirm_mood(),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            if idx < Mood::all().len() {
                app.mood_cursor = idx;
                app.confirm_mood();
            }
        }
        KeyCode::Esc => app.ui_mode = UiMode::Normal,
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the timer settings panel
fn handle_timer_settings_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('f') => app.cycle_focus_preset(),
        KeyCode::Char('b') => app.cycle_break_preset(),
        KeyCode::Char('F') => {
            app.input.clear();
            app.ui_mode = UiMode::EditingFocusMinutes;
        }
        KeyCode::Char('B') => {
            app.input.clear();
            app.ui_mode = UiMode::EditingBreakMinutes;
        }
        KeyCode::Char('a') => app.toggle_auto_start_breaks(),
        KeyCode::Char('s') => app.toggle_timer_sound(),
        KeyCode::Char('t') => app.cycle_alarm_tone(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_alarm_volume(ALARM_VOLUME_STEP),
        KeyCode::Char('-') | KeyCode::Char('_') => app.adjust_alarm_volume(-ALARM_VOLUME_STEP),
        KeyCode::Char(' ') => app.toggle_timer(),
        KeyCode::Char('r') => app.reset_timer(),
        KeyCode::Esc | KeyCode::Char('q') => app.ui_mode = UiMode::Normal,
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the documents panel
fn handle_documents_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.doc_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.doc_cursor_down(),
        KeyCode::Char('o') => app.start_open_document(),
        KeyCode::Enter => app.open_document_externally(),
        KeyCode::Char('x') => {
            app.shelf.close();
            app.doc_cursor = app.shelf.current.unwrap_or(0);
        }
        KeyCode::Esc | KeyCode::Char('q') => app.ui_mode = UiMode::Normal,
        code => {
            if let Some(doc) = app.shelf.current_mut() {
                match code {
                    KeyCode::Right | KeyCode::Char('n') => doc.next_page(),
                    KeyCode::Left | KeyCode::Char('p') => doc.prev_page(),
                    KeyCode::Home => doc.go_to(1),
                    KeyCode::End => doc.go_to(doc.pages),
                    KeyCode::Char('+') | KeyCode::Char('=') => doc.zoom_in(),
                    KeyCode::Char('-') => doc.zoom_out(),
                    KeyCode::Char('r') => doc.rotate_clockwise(),
                    KeyCode::Char('0') => doc.reset_view(),
                    _ => {}
                }
            }
        }
    }
    Ok(false)
}

/// Handle keys in the focus-mode overlay
fn handle_focus_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.focus_sub_up(),
        KeyCode::Down | KeyCode::Char('j') => app.focus_sub_down(),
        KeyCode::Enter | KeyCode::Char(' ') => app.focus_toggle_sub()?,
        KeyCode::Char('s') => app.focus_cycle_status()?,
        KeyCode::Char('a') => app.focus_start_add_sub(),
        KeyCode::Char('d') => app.focus_delete_sub()?,
        KeyCode::Char('n') => app.focus_start_notes(),

        // Assistant
        KeyCode::Char('1') => app.ask_assistant(AssistPrompt::Stuck),
        KeyCode::Char('2') => app.ask_assistant(AssistPrompt::Breakdown),
        KeyCode::Char('3') => app.ask_assistant(AssistPrompt::Motivation),
        KeyCode::Char('4') => app.ask_assistant(AssistPrompt::Research),
        KeyCode::Char('?') | KeyCode::Char('i') => app.focus_start_ask(),
        KeyCode::Char('A') => app.add_suggested_sub_tasks()?,

        // Panels and timer
        KeyCode::Char('t') => app.toggle_timer(),
        KeyCode::Char('r') => app.reset_timer(),
        KeyCode::Char('T') => app.toggle_focus_timer(),
        KeyCode::Char('M') => app.toggle_focus_music(),
        KeyCode::Char('I') => app.toggle_focus_ai(),
        KeyCode::Char('P') => {
            if app.settings.focus_mode.enable_music {
                app.toggle_play();
            }
        }

        KeyCode::Esc | KeyCode::Char('q') => app.exit_focus(),
        _ => {}
    }
    Ok(false)
}

/// Chat: text entry plus Ctrl+L to clear the conversation
fn handle_chat_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.chat.clear();
        return Ok(false);
    }
    handle_text_entry(app, key)
}

/// Music search: arrows browse results, Enter on an empty query plays the highlighted one
fn handle_music_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => app.search_cursor_up(),
        KeyCode::Down => app.search_cursor_down(),
        _ => return handle_text_entry(app, key),
    }
    Ok(false)
}

/// Adding a task: Tab cycles the category
fn handle_add_task_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Tab {
        app.new_task_category = app.new_task_category.next();
        return Ok(false);
    }
    handle_text_entry(app, key)
}

/// Handle keys in any single-line text entry mode
fn handle_text_entry(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input()?,
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => app.input_backspace(),
        // Without Ctrl so Ctrl+C still quits
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_add_char(c)
        }
        _ => {}
    }
    Ok(false)
}

/// Edit the selected task's notes in $EDITOR. The caller leaves raw mode first.
pub fn edit_notes_external(app: &mut AppState) -> Result<()> {
    app.external_edit_requested = false;
    let Some(notes) = app.selected_task_notes() else {
        return Ok(());
    };

    let editor = env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(windows) {
            "notepad".to_string()
        } else {
            "vi".to_string()
        }
    });

    let mut temp_file = NamedTempFile::new()?;
    std::io::Write::write_all(&mut temp_file, notes.as_bytes())?;
    let temp_path = temp_file.into_temp_path();

    let status = Command::new(&editor).arg(&temp_path).status()?;
    if status.success() {
        let edited = fs::read_to_string(&temp_path)?;
        app.replace_selected_notes(&edited)?;
    } else {
        app.error(format!("{editor} exited with {status}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::chain::tests::{chain, ScriptedBackend};
    use crate::ai::Worker;
    use crate::domain::{Category, Task};
    use crate::persistence::{LocalTaskStore, Settings};
    use crate::sync::TaskRepository;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};

    fn create_test_app() -> (AppState, TempDir) {
        let dir = tempdir().unwrap();
        let store = LocalTaskStore::new(dir.path().join("tasks.json"));
        store.save(&[Task::new("Test task", Category::Work)]).unwrap();
        let worker = Worker::new(Arc::new(chain(Arc::new(ScriptedBackend::default()))));
        let mut app = AppState::new(
            TaskRepository::new(store, None),
            Settings::default(),
            dir.path().join("settings.json"),
            worker,
        );
        app.notifications_enabled = false;
        app.open_in_browser = false;
        app.load().unwrap();
        (app, dir)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_navigation() {
        let (mut app, _dir) = create_test_app();
        app.add_task("Task 2", Category::Personal).unwrap();

        assert_eq!(app.selected_index, 0);
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);
        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_handle_quit() {
        let (mut app, _dir) = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
    }

    #[test]
    fn test_ctrl_c_quits_from_text_entry() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut app, ctrl_c).unwrap());
        assert_eq!(app.input, "");
    }

    #[test]
    fn test_handle_add_task_with_category() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "New");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.tasks().len(), 2);
        assert_eq!(app.tasks()[1].category, Category::Work);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_typing_q_in_form_does_not_quit() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert!(!handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.tasks().len(), 1);
    }

    #[test]
    fn test_handle_delete_with_delete_key() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        assert!(app.tasks().is_empty());
        handle_key(&mut app, key(KeyCode::Char('u'))).unwrap();
        assert_eq!(app.tasks().len(), 1);
    }

    #[test]
    fn test_mood_selector_number_key() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('m'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::MoodSelector);
        handle_key(&mut app, key(KeyCode::Char('2'))).unwrap();
        assert_eq!(app.mood.current, Mood::all()[1]);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_timer_settings_custom_minutes() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('T'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('F'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::EditingFocusMinutes);
        type_text(&mut app, "45");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::TimerSettings);
        assert_eq!(app.pomodoro.settings.focus_minutes, 45);
    }

    #[test]
    fn test_focus_mode_keys() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('f'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Focus);

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "First step");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Focus);
        assert_eq!(app.focus_task().unwrap().sub_tasks.len(), 1);

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.focus_task().unwrap().sub_tasks[0].completed);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.focus.is_none());
    }

    #[test]
    fn test_external_edit_request() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('N'))).unwrap();
        assert!(app.external_edit_requested);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Help);
        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(!app.tasks()[0].completed);
    }
}
