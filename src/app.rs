use crate::ai::{AiRequest, AssistPanel, AssistPrompt, ChainReply, ChatSession, SendResult, Worker};
use crate::domain::music::{self, record_search, NO_MATCHES_MESSAGE};
use crate::domain::{
    flatten_tasks, parse_due_date, Category, DocumentShelf, Mood, MoodState, Player, Pomodoro,
    SearchOutcome, StorageMode, SubTaskStatus, Task, TimerEvent, UiMode, Video,
};
use crate::notifications;
use crate::persistence::{save_settings, Settings};
use crate::sync::{SyncOutcome, TaskRepository, UserDataRemote};
use crate::ticker::AnimationClock;
use anyhow::Result;
use chrono::Local;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;

/// Deleted tasks kept for undo
const MAX_UNDO: usize = 10;
const MESSAGE_TTL: Duration = Duration::from_secs(4);
const MAX_MESSAGES: usize = 3;
const VOLUME_STEP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Footer message that disappears after a few seconds
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
    pub expires_at: Instant,
}

/// A deleted task and where it sat in the list
#[derive(Debug, Clone)]
pub struct UndoEntry {
    pub task: Task,
    pub index: usize,
}

/// Focus-mode overlay state
#[derive(Debug, Clone)]
pub struct FocusState {
    pub task_id: Uuid,
    pub sub_index: usize,
}

/// Main application state
pub struct AppState {
    pub repo: TaskRepository,
    pub backend: Option<Box<dyn UserDataRemote>>,
    pub settings: Settings,
    settings_path: PathBuf,
    pub settings_dirty: bool,

    pub mood: MoodState,
    pub pomodoro: Pomodoro,
    pub player: Player,
    pub shelf: DocumentShelf,
    pub chat: ChatSession,
    pub assist: AssistPanel,
    worker: Worker<AiRequest>,

    pub ui_mode: UiMode,
    pub input: String,
    pub new_task_category: Category,
    pub selected_index: usize,
    pub collapsed: HashSet<Uuid>,
    pub undo_stack: Vec<UndoEntry>,
    pub messages: VecDeque<StatusMessage>,
    pub clock: AnimationClock,
    pub focus: Option<FocusState>,
    pub mood_cursor: usize,
    pub search_results: Vec<Video>,
    pub search_cursor: usize,
    pub doc_cursor: usize,

    pub open_in_browser: bool,
    pub notifications_enabled: bool,
    /// Set by the key handler; the main loop suspends the terminal and runs $EDITOR
    pub external_edit_requested: bool,
    launched_video: Option<String>,
}

impl AppState {
    pub fn new(
        repo: TaskRepository,
        settings: Settings,
        settings_path: PathBuf,
        worker: Worker<AiRequest>,
    ) -> Self {
        let mut player = Player {
            liked: settings.liked_videos.clone(),
            ..Player::default()
        };
        player.set_volume(settings.music_volume as i32);
        player.load_mood_playlist(settings.current_mood);

        Self {
            repo,
            backend: None,
            mood: MoodState::new(settings.current_mood),
            pomodoro: Pomodoro::new(settings.pomodoro.clone()),
            player,
            settings,
            settings_path,
            settings_dirty: false,
            shelf: DocumentShelf::new(),
            chat: ChatSession::new(),
            assist: AssistPanel::new(),
            worker,
            ui_mode: UiMode::Normal,
            input: String::new(),
            new_task_category: Category::default(),
            selected_index: 0,
            collapsed: HashSet::new(),
            undo_stack: Vec::new(),
            messages: VecDeque::new(),
            clock: AnimationClock::default(),
            focus: None,
            mood_cursor: 0,
            search_results: Vec::new(),
            search_cursor: 0,
            doc_cursor: 0,
            open_in_browser: true,
            notifications_enabled: true,
            external_edit_requested: false,
            launched_video: None,
        }
    }

    /// Attach the signed-in backend used for mood and liked-video sync
    pub fn with_backend(mut self, backend: impl UserDataRemote + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.repo.mode()
    }

    pub fn tasks(&self) -> &[Task] {
        self.repo.tasks()
    }

    /// Initial load of tasks plus remote liked videos
    pub fn load(&mut self) -> Result<()> {
        let outcome = self.repo.load()?;
        if outcome.is_local_only() {
            self.error("Error loading tasks");
        }
        if let Some(backend) = &self.backend {
            match backend.liked_videos() {
                Ok(remote) => {
                    let mut changed = false;
                    for id in remote {
                        if !self.player.is_liked(&id) {
                            self.player.liked.push(id);
                            changed = true;
                        }
                    }
                    if changed {
                        self.settings.liked_videos = self.player.liked.clone();
                        self.settings_dirty = true;
                    }
                }
                Err(e) => warn!(error = %e, "loading liked videos failed"),
            }
        }
        self.clamp_selection();
        Ok(())
    }

    // ---- messages ----

    pub fn push_message(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.messages.push_back(StatusMessage {
            text: text.into(),
            kind,
            expires_at: Instant::now() + MESSAGE_TTL,
        });
        while self.messages.len() > MAX_MESSAGES {
            self.messages.pop_front();
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push_message(text, MessageKind::Info);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push_message(text, MessageKind::Success);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push_message(text, MessageKind::Error);
    }

    pub fn current_message(&self) -> Option<&StatusMessage> {
        self.messages.back()
    }

    fn note_outcome(&mut self, action: &str, outcome: &SyncOutcome) {
        if outcome.is_local_only() {
            self.error(format!("Error {action}: saved locally"));
        }
    }

    // ---- selection ----

    /// (task index, sub-task index) of the highlighted row
    pub fn get_selected_item(&self) -> Option<(usize, Option<usize>)> {
        let rows = flatten_tasks(self.repo.tasks(), &self.collapsed);
        let row = rows.get(self.selected_index)?;
        Some((row.task_index, row.subtask_index))
    }

    /// Ids of the highlighted task and, for sub-task rows, the sub-task
    pub fn selected_ids(&self) -> Option<(Uuid, Option<Uuid>)> {
        let (task_idx, sub_idx) = self.get_selected_item()?;
        let task = self.repo.tasks().get(task_idx)?;
        let sub = match sub_idx {
            Some(i) => Some(task.sub_tasks.get(i)?.id),
            None => None,
        };
        Some((task.id, sub))
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let (task_idx, _) = self.get_selected_item()?;
        self.repo.tasks().get(task_idx)
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let len = flatten_tasks(self.repo.tasks(), &self.collapsed).len();
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = flatten_tasks(self.repo.tasks(), &self.collapsed).len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    /// Collapse or expand the sub-tasks of the highlighted task
    pub fn toggle_expand(&mut self) {
        if let Some((id, None)) = self.selected_ids() {
            if !self.collapsed.remove(&id) {
                self.collapsed.insert(id);
            }
        }
    }

    // ---- task operations ----

    fn update_task<F>(&mut self, id: Uuid, action: &str, f: F) -> Result<bool>
    where
        F: FnOnce(&mut Task) -> bool,
    {
        match self.repo.modify(id, f)? {
            Some(outcome) => {
                self.note_outcome(action, &outcome);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn add_task(&mut self, text: &str, category: Category) -> Result<bool> {
        let Some(text) = crate::domain::task::validate_text(text) else {
            return Ok(false);
        };
        let (_, outcome) = self.repo.add(Task::new(text, category))?;
        self.note_outcome("adding task", &outcome);
        if !outcome.is_local_only() {
            self.success("Task added");
        }
        Ok(true)
    }

    pub fn add_sub_task(&mut self, task_id: Uuid, text: &str) -> Result<bool> {
        let added = self.update_task(task_id, "adding sub-task", |t| t.add_sub_task(text).is_some())?;
        if added {
            self.collapsed.remove(&task_id);
        }
        Ok(added)
    }

    /// Complete or reopen the highlighted task or sub-task
    pub fn toggle_complete_selected(&mut self) -> Result<()> {
        match self.selected_ids() {
            Some((task_id, Some(sub_id))) => self.toggle_sub_task(task_id, sub_id),
            Some((task_id, None)) => self.toggle_task(task_id),
            None => Ok(()),
        }
    }

    fn toggle_task(&mut self, task_id: Uuid) -> Result<()> {
        let Some((outcome, affirmation)) = self.repo.toggle_complete(task_id)? else {
            return Ok(());
        };
        self.note_outcome("updating task", &outcome);
        if let Some(affirmation) = affirmation {
            let title = self
                .repo
                .get(task_id)
                .map(|t| t.text.clone())
                .unwrap_or_default();
            if self.notifications_enabled {
                notifications::notify_task_done(&title);
            }
            self.success(affirmation);
        }
        Ok(())
    }

    pub fn toggle_sub_task(&mut self, task_id: Uuid, sub_id: Uuid) -> Result<()> {
        let was_done = self
            .repo
            .get(task_id)
            .map(|t| t.all_sub_tasks_done())
            .unwrap_or(false);
        self.update_task(task_id, "updating sub-task", |t| t.toggle_sub_task(sub_id))?;
        if !was_done {
            self.celebrate_if_all_done(task_id);
        }
        Ok(())
    }

    pub fn cycle_sub_task_status(&mut self, task_id: Uuid, sub_id: Uuid) -> Result<()> {
        let Some(status) = self
            .repo
            .get(task_id)
            .and_then(|t| t.sub_tasks.iter().find(|s| s.id == sub_id))
            .map(|s| s.status.cycle())
        else {
            return Ok(());
        };
        self.update_task(task_id, "updating sub-task", |t| {
            t.set_sub_task_status(sub_id, status)
        })?;
        if status == SubTaskStatus::Done {
            self.celebrate_if_all_done(task_id);
        }
        Ok(())
    }

    fn celebrate_if_all_done(&mut self, task_id: Uuid) {
        let all_done = self
            .repo
            .get(task_id)
            .map(|t| t.all_sub_tasks_done())
            .unwrap_or(false);
        if all_done && self.focus.is_some() {
            self.success("All sub-tasks complete! Great job!");
        }
    }

    pub fn cycle_status_selected(&mut self) -> Result<()> {
        if let Some((task_id, Some(sub_id))) = self.selected_ids() {
            self.cycle_sub_task_status(task_id, sub_id)?;
        }
        Ok(())
    }

    pub fn toggle_priority_selected(&mut self) -> Result<()> {
        if let Some((task_id, _)) = self.selected_ids() {
            self.update_task(task_id, "updating task", |t| {
                t.toggle_priority();
                true
            })?;
        }
        Ok(())
    }

    pub fn cycle_category_selected(&mut self) -> Result<()> {
        if let Some((task_id, None)) = self.selected_ids() {
            self.update_task(task_id, "updating task", |t| {
                t.category = t.category.next();
                true
            })?;
        }
        Ok(())
    }

    /// Delete the highlighted row. Whole tasks go on the undo stack.
    pub fn delete_selected(&mut self) -> Result<()> {
        match self.selected_ids() {
            Some((task_id, Some(sub_id))) => {
                self.update_task(task_id, "deleting sub-task", |t| t.delete_sub_task(sub_id))?;
            }
            Some((task_id, None)) => {
                let index = self
                    .repo
                    .tasks()
                    .iter()
                    .position(|t| t.id == task_id)
                    .unwrap_or(0);
                if let Some((task, outcome)) = self.repo.delete(task_id)? {
                    self.note_outcome("deleting task", &outcome);
                    self.undo_stack.push(UndoEntry { task, index });
                    if self.undo_stack.len() > MAX_UNDO {
                        self.undo_stack.remove(0);
                    }
                    if !outcome.is_local_only() {
                        self.info("Task deleted (u to undo)");
                    }
                }
            }
            None => {}
        }
        self.clamp_selection();
        Ok(())
    }

    pub fn undo(&mut self) -> Result<()> {
        let Some(entry) = self.undo_stack.pop() else {
            self.info("Nothing to undo");
            return Ok(());
        };
        let outcome = self.repo.restore(entry.task, entry.index)?;
        self.note_outcome("restoring task", &outcome);
        if !outcome.is_local_only() {
            self.success("Task restored");
        }
        Ok(())
    }

    // ---- text input ----

    fn begin_input(&mut self, mode: UiMode, initial: String) {
        self.input = initial;
        self.ui_mode = mode;
    }

    pub fn start_add_task(&mut self) {
        self.new_task_category = Category::default();
        self.begin_input(UiMode::AddingTask, String::new());
    }

    pub fn start_add_subtask(&mut self) {
        if self.selected_ids().is_some() {
            self.begin_input(UiMode::AddingSubtask, String::new());
        }
    }

    pub fn start_rename(&mut self) {
        let Some((task_idx, sub_idx)) = self.get_selected_item() else {
            return;
        };
        let Some(task) = self.repo.tasks().get(task_idx) else {
            return;
        };
        let text = match sub_idx {
            Some(i) => task.sub_tasks.get(i).map(|s| s.text.clone()),
            None => Some(task.text.clone()),
        };
        if let Some(text) = text {
            self.begin_input(UiMode::EditingTask, text);
        }
    }

    pub fn start_edit_notes(&mut self) {
        let Some((task_idx, sub_idx)) = self.get_selected_item() else {
            return;
        };
        let Some(task) = self.repo.tasks().get(task_idx) else {
            return;
        };
        let notes = match sub_idx {
            Some(i) => task.sub_tasks.get(i).and_then(|s| s.notes.clone()),
            None => task.notes.clone(),
        };
        self.begin_input(UiMode::EditingNotes, notes.unwrap_or_default());
    }

    pub fn start_edit_due_date(&mut self) {
        let Some((task_idx, sub_idx)) = self.get_selected_item() else {
            return;
        };
        let Some(task) = self.repo.tasks().get(task_idx) else {
            return;
        };
        let due = match sub_idx {
            Some(i) => task.sub_tasks.get(i).and_then(|s| s.due_date),
            None => task.due_date,
        };
        let initial = due.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        self.begin_input(UiMode::EditingDueDate, initial);
    }

    pub fn input_add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Leave the current text-entry mode, returning to where it was opened from
    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.ui_mode = match self.ui_mode {
            UiMode::FocusAsking | UiMode::FocusAddingSubtask | UiMode::FocusEditingNotes => {
                UiMode::Focus
            }
            UiMode::EditingFocusMinutes | UiMode::EditingBreakMinutes => UiMode::TimerSettings,
            UiMode::OpeningDocument => UiMode::Documents,
            _ => UiMode::Normal,
        };
    }

    /// Apply the text buffer according to the active mode
    pub fn submit_input(&mut self) -> Result<()> {
        let text = std::mem::take(&mut self.input);
        let mode = self.ui_mode;
        match mode {
            UiMode::AddingTask => {
                self.add_task(&text, self.new_task_category)?;
            }
            UiMode::AddingSubtask => {
                if let Some((task_id, _)) = self.selected_ids() {
                    self.add_sub_task(task_id, &text)?;
                }
            }
            UiMode::EditingTask => self.submit_rename(&text)?,
            UiMode::EditingNotes => self.submit_notes(&text)?,
            UiMode::EditingDueDate => {
                if !self.submit_due_date(&text)? {
                    self.input = text;
                    return Ok(());
                }
            }
            UiMode::Chat => {
                self.send_chat(&text);
                return Ok(());
            }
            UiMode::MusicSearch => {
                self.submit_music_search(&text);
                return Ok(());
            }
            UiMode::OpeningDocument => {
                self.open_document(&text);
                return Ok(());
            }
            UiMode::EditingFocusMinutes => {
                match self.pomodoro.apply_custom_focus(&text) {
                    Ok(()) => self.sync_pomodoro_settings(),
                    Err(e) => self.error(e.to_string()),
                }
                self.ui_mode = UiMode::TimerSettings;
                return Ok(());
            }
            UiMode::EditingBreakMinutes => {
                match self.pomodoro.apply_custom_break(&text) {
                    Ok(()) => self.sync_pomodoro_settings(),
                    Err(e) => self.error(e.to_string()),
                }
                self.ui_mode = UiMode::TimerSettings;
                return Ok(());
            }
            UiMode::FocusAsking => {
                self.ask_assistant(AssistPrompt::Custom(text));
                self.ui_mode = UiMode::Focus;
                return Ok(());
            }
            UiMode::FocusAddingSubtask => {
                if let Some(focus) = &self.focus {
                    let task_id = focus.task_id;
                    self.add_sub_task(task_id, &text)?;
                }
                self.ui_mode = UiMode::Focus;
                return Ok(());
            }
            UiMode::FocusEditingNotes => {
                if let Some(focus) = &self.focus {
                    let task_id = focus.task_id;
                    self.update_task(task_id, "updating notes", |t| {
                        let before = t.notes.clone();
                        t.set_notes(&text);
                        t.notes != before
                    })?;
                }
                self.ui_mode = UiMode::Focus;
                return Ok(());
            }
            _ => {}
        }
        self.ui_mode = UiMode::Normal;
        Ok(())
    }

    fn submit_rename(&mut self, text: &str) -> Result<()> {
        match self.selected_ids() {
            Some((task_id, Some(sub_id))) => {
                self.update_task(task_id, "updating sub-task", |t| t.rename_sub_task(sub_id, text))?;
            }
            Some((task_id, None)) => {
                self.update_task(task_id, "updating task", |t| t.rename(text))?;
            }
            None => {}
        }
        Ok(())
    }

    fn submit_notes(&mut self, text: &str) -> Result<()> {
        let trimmed = text.trim();
        let notes = (!trimmed.is_empty()).then(|| trimmed.to_string());
        match self.selected_ids() {
            Some((task_id, Some(sub_id))) => {
                self.update_task(task_id, "updating sub-task", |t| match t.sub_task_mut(sub_id) {
                    Some(sub) if sub.notes != notes => {
                        sub.notes = notes;
                        true
                    }
                    _ => false,
                })?;
            }
            Some((task_id, None)) => {
                self.update_task(task_id, "updating notes", |t| {
                    let before = t.notes.clone();
                    t.set_notes(text);
                    t.notes != before
                })?;
            }
            None => {}
        }
        Ok(())
    }

    /// Returns false when the input could not be parsed as a date
    fn submit_due_date(&mut self, text: &str) -> Result<bool> {
        let date = if text.trim().is_empty() {
            None
        } else {
            match parse_due_date(text, Local::now().date_naive()) {
                Some(d) => Some(d),
                None => {
                    self.error("Invalid date: use today, tomorrow, +N or YYYY-MM-DD");
                    return Ok(false);
                }
            }
        };
        match self.selected_ids() {
            Some((task_id, Some(sub_id))) => {
                self.update_task(task_id, "updating sub-task", |t| match t.sub_task_mut(sub_id) {
                    Some(sub) if sub.due_date != date => {
                        sub.due_date = date;
                        true
                    }
                    _ => false,
                })?;
            }
            Some((task_id, None)) => {
                self.update_task(task_id, "updating task", |t| {
                    let changed = t.due_date != date;
                    t.set_due_date(date);
                    changed
                })?;
            }
            None => {}
        }
        Ok(true)
    }

    /// Notes of the highlighted task, if a task row is selected
    pub fn selected_task_notes(&self) -> Option<String> {
        match self.get_selected_item()? {
            (task_idx, None) => Some(self.repo.tasks().get(task_idx)?.notes.clone().unwrap_or_default()),
            _ => None,
        }
    }

    /// Replace the notes of the highlighted task (used by the external editor)
    pub fn replace_selected_notes(&mut self, notes: &str) -> Result<()> {
        if let Some((task_id, None)) = self.selected_ids() {
            self.update_task(task_id, "updating notes", |t| {
                let before = t.notes.clone();
                t.set_notes(notes);
                t.notes != before
            })?;
        }
        Ok(())
    }

    // ---- mood ----

    pub fn open_mood_selector(&mut self) {
        self.mood_cursor = Mood::all()
            .iter()
            .position(|m| *m == self.mood.current)
            .unwrap_or(0);
        self.ui_mode = UiMode::MoodSelector;
    }

    pub fn mood_cursor_up(&mut self) {
        self.mood_cursor = self.mood_cursor.saturating_sub(1);
    }

    pub fn mood_cursor_down(&mut self) {
        if self.mood_cursor + 1 < Mood::all().len() {
            self.mood_cursor += 1;
        }
    }

    pub fn confirm_mood(&mut self) {
        if let Some(&mood) = Mood::all().get(self.mood_cursor) {
            self.set_mood(mood, Instant::now());
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn set_mood(&mut self, mood: Mood, now: Instant) {
        if !self.mood.set(mood, now) {
            return;
        }
        info!(mood = mood.key(), "mood changed");
        self.settings.current_mood = mood;
        self.settings_dirty = true;
        self.player.load_mood_playlist(mood);
        if let Some(backend) = &self.backend {
            if let Err(e) = backend.save_mood(mood) {
                warn!(error = %e, "saving mood to backend failed");
            }
        }
    }

    // ---- pomodoro ----

    pub fn toggle_timer(&mut self) {
        self.pomodoro.toggle(Instant::now());
    }

    pub fn reset_timer(&mut self) {
        self.pomodoro.reset();
    }

    fn sync_pomodoro_settings(&mut self) {
        self.settings.pomodoro = self.pomodoro.settings.clone();
        self.settings_dirty = true;
    }

    pub fn cycle_focus_preset(&mut self) {
        self.pomodoro.cycle_focus_preset();
        self.sync_pomodoro_settings();
    }

    pub fn cycle_break_preset(&mut self) {
        self.pomodoro.cycle_break_preset();
        self.sync_pomodoro_settings();
    }

    pub fn toggle_auto_start_breaks(&mut self) {
        self.pomodoro.settings.auto_start_breaks = !self.pomodoro.settings.auto_start_breaks;
        self.sync_pomodoro_settings();
    }

    pub fn toggle_timer_sound(&mut self) {
        self.pomodoro.settings.sound_enabled = !self.pomodoro.settings.sound_enabled;
        self.sync_pomodoro_settings();
    }

    pub fn cycle_alarm_tone(&mut self) {
        self.pomodoro.settings.alarm_tone = self.pomodoro.settings.alarm_tone.next();
        self.sync_pomodoro_settings();
    }

    pub fn adjust_alarm_volume(&mut self, delta: i32) {
        let volume = self.pomodoro.settings.alarm_volume as i32 + delta;
        self.pomodoro.set_volume(volume);
        self.sync_pomodoro_settings();
    }

    fn on_timer_event(&mut self, event: TimerEvent) {
        if let TimerEvent::FocusComplete { minutes } = event {
            let task = self
                .focus
                .as_ref()
                .and_then(|f| self.repo.get(f.task_id))
                .map(|t| t.text.clone());
            self.settings.record_focus_session(minutes, task);
            self.settings_dirty = true;
        }
        if self.pomodoro.settings.sound_enabled && self.notifications_enabled {
            notifications::alarm(event.title(), event.description());
        }
        self.info(format!("{} {}", event.title(), event.description()));
    }

    // ---- music ----

    fn launch_current(&mut self) {
        if !self.player.playing || !self.open_in_browser {
            return;
        }
        let Some(video) = self.player.current_video() else {
            return;
        };
        if self.launched_video.as_deref() == Some(video.id.as_str()) {
            return;
        }
        let (id, url) = (video.id.clone(), video.watch_url());
        match notifications::open_external(&url) {
            Ok(()) => self.launched_video = Some(id),
            Err(e) => self.error(format!("Could not open video: {e}")),
        }
    }

    pub fn toggle_play(&mut self) {
        if self.player.current.is_none() {
            self.player.load_mood_playlist(self.mood.current);
        }
        self.player.toggle_play();
        self.launch_current();
    }

    pub fn next_track(&mut self) {
        self.player.next();
        self.launched_video = None;
        self.launch_current();
    }

    pub fn prev_track(&mut self) {
        self.player.prev();
        self.launched_video = None;
        self.launch_current();
    }

    pub fn adjust_volume(&mut self, up: bool) {
        let delta = if up { VOLUME_STEP } else { -VOLUME_STEP };
        self.player.set_volume(self.player.volume as i32 + delta);
        self.settings.music_volume = self.player.volume;
        self.settings_dirty = true;
    }

    pub fn toggle_mute(&mut self) {
        self.player.toggle_mute();
    }

    pub fn toggle_shuffle(&mut self) {
        self.player.shuffle = !self.player.shuffle;
    }

    pub fn toggle_repeat(&mut self) {
        self.player.repeat = !self.player.repeat;
    }

    pub fn toggle_like(&mut self) {
        let Some(video) = self.player.current_video().cloned() else {
            return;
        };
        let liked = self.player.toggle_like(&video.id);
        self.settings.liked_videos = self.player.liked.clone();
        self.settings_dirty = true;
        if let Some(backend) = &self.backend {
            let result = if liked {
                backend.save_liked_video(&video)
            } else {
                backend.remove_liked_video(&video.id)
            };
            if let Err(e) = result {
                warn!(video = %video.id, error = %e, "syncing liked video failed");
            }
        }
        if liked {
            self.success(format!("Added \"{}\" to liked videos", video.title));
        } else {
            self.info(format!("Removed \"{}\" from liked videos", video.title));
        }
    }

    pub fn open_music_search(&mut self) {
        self.search_results.clear();
        self.search_cursor = 0;
        self.begin_input(UiMode::MusicSearch, String::new());
    }

    pub fn search_cursor_up(&mut self) {
        self.search_cursor = self.search_cursor.saturating_sub(1);
    }

    pub fn search_cursor_down(&mut self) {
        if self.search_cursor + 1 < self.search_results.len() {
            self.search_cursor += 1;
        }
    }

    /// Run a search, or play the highlighted result when the query is empty
    pub fn submit_music_search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            if let Some(video) = self.search_results.get(self.search_cursor).cloned() {
                let index = self.search_cursor;
                self.player.set_queue(self.search_results.clone(), index);
                self.player.playing = true;
                self.launched_video = None;
                self.success(format!("Now playing: {}", video.title));
                self.launch_current();
                self.ui_mode = UiMode::Normal;
            }
            return;
        }

        record_search(&mut self.settings.recent_searches, query);
        self.settings_dirty = true;
        match music::search(query) {
            SearchOutcome::Direct(video) => {
                self.success(format!("Now playing: {}", video.title));
                self.player.select(video);
                self.launched_video = None;
                self.launch_current();
                self.ui_mode = UiMode::Normal;
            }
            SearchOutcome::Results { videos, category } => {
                let label = category.unwrap_or("search");
                self.info(format!("{} results ({label})", videos.len()));
                self.search_results = videos;
                self.search_cursor = 0;
            }
            SearchOutcome::NoMatches => {
                self.search_results.clear();
                self.error(NO_MATCHES_MESSAGE);
            }
        }
    }

    // ---- documents ----

    pub fn open_documents(&mut self) {
        self.doc_cursor = self.shelf.current.unwrap_or(0);
        self.ui_mode = UiMode::Documents;
    }

    pub fn start_open_document(&mut self) {
        self.begin_input(UiMode::OpeningDocument, String::new());
    }

    pub fn open_document(&mut self, path: &str) {
        let trimmed = path.trim();
        self.ui_mode = UiMode::Documents;
        if trimmed.is_empty() {
            return;
        }
        let expanded = expand_home(trimmed);
        match self.shelf.open(&expanded) {
            Ok(idx) => {
                self.doc_cursor = idx;
                if let Some(doc) = self.shelf.current() {
                    let msg = format!("Opened {} ({} pages)", doc.name, doc.pages);
                    self.success(msg);
                }
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn doc_cursor_up(&mut self) {
        self.doc_cursor = self.doc_cursor.saturating_sub(1);
        self.shelf.select(self.doc_cursor);
    }

    pub fn doc_cursor_down(&mut self) {
        if self.doc_cursor + 1 < self.shelf.documents.len() {
            self.doc_cursor += 1;
        }
        self.shelf.select(self.doc_cursor);
    }

    pub fn open_document_externally(&mut self) {
        let Some(path) = self.shelf.current().map(|d| d.path.clone()) else {
            return;
        };
        if let Err(e) = notifications::open_path(&path) {
            self.error(format!("Could not open document: {e}"));
        }
    }

    // ---- chat ----

    pub fn open_chat(&mut self) {
        self.begin_input(UiMode::Chat, String::new());
    }

    pub fn send_chat(&mut self, text: &str) {
        match self.chat.send(text, self.mood.current, &self.worker) {
            SendResult::Sent | SendResult::Blank => {}
            SendResult::Busy => {
                self.input = text.to_string();
                self.info("Still waiting for the last reply");
            }
        }
    }

    fn on_ai_reply(&mut self, request: AiRequest, reply: ChainReply) {
        match request {
            AiRequest::Chat => self.chat.receive(reply),
            AiRequest::Assist { task_id, breakdown } => {
                let found = self.assist.receive(task_id, breakdown, reply);
                if found > 0 {
                    self.info(format!(
                        "{found} potential sub-tasks identified. Press A to add them."
                    ));
                }
            }
        }
    }

    // ---- focus mode ----

    pub fn enter_focus(&mut self) {
        if let Some((task_id, _)) = self.selected_ids() {
            self.focus = Some(FocusState {
                task_id,
                sub_index: 0,
            });
            self.assist.reset();
            self.ui_mode = UiMode::Focus;
        }
    }

    pub fn exit_focus(&mut self) {
        self.focus = None;
        self.assist.reset();
        self.ui_mode = UiMode::Normal;
    }

    pub fn focus_task(&self) -> Option<&Task> {
        self.focus.as_ref().and_then(|f| self.repo.get(f.task_id))
    }

    fn focus_sub_id(&self) -> Option<(Uuid, Uuid)> {
        let focus = self.focus.as_ref()?;
        let task = self.repo.get(focus.task_id)?;
        let sub = task.sub_tasks.get(focus.sub_index)?;
        Some((task.id, sub.id))
    }

    pub fn focus_sub_up(&mut self) {
        if let Some(focus) = &mut self.focus {
            focus.sub_index = focus.sub_index.saturating_sub(1);
        }
    }

    pub fn focus_sub_down(&mut self) {
        let len = self.focus_task().map(|t| t.sub_tasks.len()).unwrap_or(0);
        if let Some(focus) = &mut self.focus {
            if focus.sub_index + 1 < len {
                focus.sub_index += 1;
            }
        }
    }

    pub fn focus_toggle_sub(&mut self) -> Result<()> {
        if let Some((task_id, sub_id)) = self.focus_sub_id() {
            self.toggle_sub_task(task_id, sub_id)?;
        }
        Ok(())
    }

    pub fn focus_cycle_status(&mut self) -> Result<()> {
        if let Some((task_id, sub_id)) = self.focus_sub_id() {
            self.cycle_sub_task_status(task_id, sub_id)?;
        }
        Ok(())
    }

    pub fn focus_delete_sub(&mut self) -> Result<()> {
        if let Some((task_id, sub_id)) = self.focus_sub_id() {
            self.update_task(task_id, "deleting sub-task", |t| t.delete_sub_task(sub_id))?;
            let len = self.focus_task().map(|t| t.sub_tasks.len()).unwrap_or(0);
            if let Some(focus) = &mut self.focus {
                focus.sub_index = focus.sub_index.min(len.saturating_sub(1));
            }
        }
        Ok(())
    }

    pub fn focus_start_add_sub(&mut self) {
        self.begin_input(UiMode::FocusAddingSubtask, String::new());
    }

    pub fn focus_start_notes(&mut self) {
        let notes = self.focus_task().and_then(|t| t.notes.clone()).unwrap_or_default();
        self.begin_input(UiMode::FocusEditingNotes, notes);
    }

    pub fn focus_start_ask(&mut self) {
        if self.settings.focus_mode.enable_ai {
            self.begin_input(UiMode::FocusAsking, String::new());
        }
    }

    pub fn ask_assistant(&mut self, prompt: AssistPrompt) {
        if !self.settings.focus_mode.enable_ai {
            return;
        }
        let Some(task) = self.focus_task().cloned() else {
            return;
        };
        if self.assist.ask(&task, prompt, self.mood.current, &self.worker) == SendResult::Busy {
            self.info("Still waiting for the last reply");
        }
    }

    /// Add every suggested sub-task from the last breakdown reply
    pub fn add_suggested_sub_tasks(&mut self) -> Result<()> {
        let Some(task_id) = self.focus.as_ref().map(|f| f.task_id) else {
            return Ok(());
        };
        let suggestions = self.assist.take_suggestions();
        if suggestions.is_empty() {
            return Ok(());
        }
        let mut added = 0;
        self.update_task(task_id, "adding sub-tasks", |t| {
            added = t.add_sub_tasks(&suggestions);
            added > 0
        })?;
        if added > 0 {
            self.success(format!("Added {added} sub-tasks"));
        }
        Ok(())
    }

    pub fn toggle_focus_timer(&mut self) {
        self.settings.focus_mode.show_timer = !self.settings.focus_mode.show_timer;
        self.settings_dirty = true;
    }

    pub fn toggle_focus_music(&mut self) {
        self.settings.focus_mode.enable_music = !self.settings.focus_mode.enable_music;
        self.settings_dirty = true;
    }

    pub fn toggle_focus_ai(&mut self) {
        self.settings.focus_mode.enable_ai = !self.settings.focus_mode.enable_ai;
        self.settings_dirty = true;
    }

    // ---- loop ----

    /// Advance timers, collect AI replies, expire messages, autosave settings
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        if let Some(event) = self.pomodoro.tick(now) {
            self.on_timer_event(event);
        }
        while let Some((request, reply)) = self.worker.poll() {
            self.on_ai_reply(request, reply);
        }
        self.messages.retain(|m| m.expires_at > now);
        self.clock.tick(self.mood.data().animation_speed);
        if self.settings_dirty {
            self.save_settings()?;
        }
        Ok(())
    }

    pub fn save_settings(&mut self) -> Result<()> {
        save_settings(&self.settings_path, &self.settings)?;
        self.settings_dirty = false;
        Ok(())
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::chain::tests::{chain, ScriptedBackend};
    use crate::persistence::{load_settings, LocalTaskStore};
    use crate::sync::SyncError;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};

    fn create_test_app(outcomes: &[(&str, Result<&str, &'static str>)]) -> (AppState, TempDir) {
        let dir = tempdir().unwrap();
        let store = LocalTaskStore::new(dir.path().join("tasks.json"));
        store
            .save(&[
                Task::new("Task 1", Category::Personal),
                Task::new("Task 2", Category::Work),
            ])
            .unwrap();
        let repo = TaskRepository::new(store, None);
        let backend = Arc::new(ScriptedBackend::with(outcomes));
        let worker = Worker::new(Arc::new(chain(backend)));
        let mut app = AppState::new(
            repo,
            Settings::default(),
            dir.path().join("settings.json"),
            worker,
        );
        app.notifications_enabled = false;
        app.open_in_browser = false;
        app.load().unwrap();
        (app, dir)
    }

    fn wait_for_reply(app: &mut AppState) {
        let (request, reply) = app.worker.wait(Duration::from_secs(5)).unwrap();
        app.on_ai_reply(request, reply);
    }

    #[test]
    fn test_app_state_new() {
        let (app, _dir) = create_test_app(&[]);
        assert_eq!(app.tasks().len(), 2);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.storage_mode(), StorageMode::Guest);
        assert!(app.player.current.is_some());
    }

    #[test]
    fn test_move_selection() {
        let (mut app, _dir) = create_test_app(&[]);
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_add_task_through_input() {
        let (mut app, _dir) = create_test_app(&[]);
        app.start_add_task();
        app.new_task_category = Category::Study;
        for c in "Read chapter 3".chars() {
            app.input_add_char(c);
        }
        app.submit_input().unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.tasks().len(), 3);
        assert_eq!(app.tasks()[2].text, "Read chapter 3");
        assert_eq!(app.tasks()[2].category, Category::Study);
    }

    #[test]
    fn test_blank_task_rejected() {
        let (mut app, _dir) = create_test_app(&[]);
        assert!(!app.add_task("   ", Category::Personal).unwrap());
        assert_eq!(app.tasks().len(), 2);
    }

    #[test]
    fn test_subtask_selection_and_toggle() {
        let (mut app, _dir) = create_test_app(&[]);
        let (task_id, _) = app.selected_ids().unwrap();
        app.add_sub_task(task_id, "Step one").unwrap();

        app.move_selection_down();
        let (_, sub) = app.selected_ids().unwrap();
        assert!(sub.is_some());

        app.toggle_complete_selected().unwrap();
        assert!(app.tasks()[0].sub_tasks[0].completed);
        assert_eq!(app.tasks()[0].sub_tasks[0].status, SubTaskStatus::Done);

        app.cycle_status_selected().unwrap();
        assert_eq!(app.tasks()[0].sub_tasks[0].status, SubTaskStatus::Todo);
        assert!(!app.tasks()[0].sub_tasks[0].completed);
    }

    #[test]
    fn test_collapse_hides_subtasks() {
        let (mut app, _dir) = create_test_app(&[]);
        let (task_id, _) = app.selected_ids().unwrap();
        app.add_sub_task(task_id, "Hidden").unwrap();
        app.toggle_expand();
        app.move_selection_down();
        assert_eq!(app.selected_ids().unwrap().0, app.tasks()[1].id);
    }

    #[test]
    fn test_complete_task_shows_affirmation() {
        let (mut app, _dir) = create_test_app(&[]);
        app.toggle_complete_selected().unwrap();
        assert!(app.tasks()[0].completed);
        assert_eq!(app.current_message().unwrap().kind, MessageKind::Success);
    }

    #[test]
    fn test_delete_and_undo() {
        let (mut app, _dir) = create_test_app(&[]);
        app.delete_selected().unwrap();
        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.undo_stack.len(), 1);

        app.undo().unwrap();
        assert_eq!(app.tasks().len(), 2);
        assert_eq!(app.tasks()[0].text, "Task 1");
        assert!(app.undo_stack.is_empty());
    }

    #[test]
    fn test_undo_stack_is_bounded() {
        let (mut app, _dir) = create_test_app(&[]);
        for i in 0..12 {
            app.add_task(&format!("Extra {i}"), Category::Personal).unwrap();
        }
        for _ in 0..12 {
            app.delete_selected().unwrap();
        }
        assert_eq!(app.undo_stack.len(), MAX_UNDO);
    }

    #[test]
    fn test_rename_noop_and_change() {
        let (mut app, _dir) = create_test_app(&[]);
        app.start_rename();
        assert_eq!(app.input, "Task 1");
        app.submit_input().unwrap();
        assert_eq!(app.tasks()[0].text, "Task 1");

        app.start_rename();
        app.input = "Renamed".into();
        app.submit_input().unwrap();
        assert_eq!(app.tasks()[0].text, "Renamed");
    }

    #[test]
    fn test_invalid_due_date_keeps_form_open() {
        let (mut app, _dir) = create_test_app(&[]);
        app.start_edit_due_date();
        app.input = "next week".into();
        app.submit_input().unwrap();
        assert_eq!(app.ui_mode, UiMode::EditingDueDate);
        assert_eq!(app.input, "next week");

        app.input = "+9999999999999999".into();
        app.submit_input().unwrap();
        assert_eq!(app.ui_mode, UiMode::EditingDueDate);
        assert_eq!(app.tasks()[0].due_date, None);

        app.input = "tomorrow".into();
        app.submit_input().unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        let tomorrow = Local::now().date_naive().succ_opt();
        assert_eq!(app.tasks()[0].due_date, tomorrow);
    }

    #[test]
    fn test_set_mood_persists() {
        let (mut app, _dir) = create_test_app(&[]);
        let now = Instant::now();
        app.set_mood(Mood::Creative, now);
        assert_eq!(app.mood.current, Mood::Creative);
        assert!(app.mood.visible_quote(now).is_some());

        app.tick(now).unwrap();
        assert!(!app.settings_dirty);
        let saved = load_settings(app.settings_path()).unwrap();
        assert_eq!(saved.current_mood, Mood::Creative);
    }

    /// Signed-in backend that is unreachable
    struct OfflineUserData;

    impl UserDataRemote for OfflineUserData {
        fn save_mood(&self, _mood: Mood) -> Result<(), SyncError> {
            Err(SyncError::Status {
                status: 503,
                body: "unavailable".into(),
            })
        }

        fn save_liked_video(&self, _video: &Video) -> Result<(), SyncError> {
            Err(SyncError::NotAuthenticated)
        }

        fn liked_videos(&self) -> Result<Vec<String>, SyncError> {
            Err(SyncError::NotAuthenticated)
        }

        fn remove_liked_video(&self, _video_id: &str) -> Result<(), SyncError> {
            Err(SyncError::NotAuthenticated)
        }
    }

    #[test]
    fn test_mood_change_survives_backend_failure() {
        let (app, _dir) = create_test_app(&[]);
        let mut app = app.with_backend(OfflineUserData);
        let now = Instant::now();
        app.set_mood(Mood::Focused, now);
        assert_eq!(app.mood.current, Mood::Focused);
        assert_eq!(app.settings.current_mood, Mood::Focused);
        assert!(app.current_message().is_none());

        app.tick(now).unwrap();
        let saved = load_settings(app.settings_path()).unwrap();
        assert_eq!(saved.current_mood, Mood::Focused);
    }

    #[test]
    fn test_same_mood_is_noop() {
        let (mut app, _dir) = create_test_app(&[]);
        app.set_mood(Mood::Motivated, Instant::now());
        assert!(app.mood.changed_at.is_none());
        assert!(!app.settings_dirty);
    }

    #[test]
    fn test_custom_focus_minutes() {
        let (mut app, _dir) = create_test_app(&[]);
        app.ui_mode = UiMode::EditingFocusMinutes;
        app.input = "150".into();
        app.submit_input().unwrap();
        assert_eq!(app.current_message().unwrap().kind, MessageKind::Error);
        assert_eq!(app.pomodoro.settings.focus_minutes, 25);

        app.ui_mode = UiMode::EditingFocusMinutes;
        app.input = "40".into();
        app.submit_input().unwrap();
        assert_eq!(app.ui_mode, UiMode::TimerSettings);
        assert_eq!(app.settings.pomodoro.focus_minutes, 40);
        assert_eq!(app.pomodoro.seconds_left, 40 * 60);
    }

    #[test]
    fn test_music_search_results_and_play() {
        let (mut app, _dir) = create_test_app(&[]);
        app.open_music_search();
        app.submit_music_search("jazz");
        assert!(!app.search_results.is_empty());
        assert_eq!(app.settings.recent_searches, vec!["jazz".to_string()]);

        app.search_cursor_down();
        app.submit_music_search("");
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.player.playing);
        assert_eq!(app.player.current, Some(1));
    }

    #[test]
    fn test_music_search_direct_id() {
        let (mut app, _dir) = create_test_app(&[]);
        app.open_music_search();
        app.submit_music_search("https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(app.player.current_video().unwrap().id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_like_updates_settings() {
        let (mut app, _dir) = create_test_app(&[]);
        let id = app.player.current_video().unwrap().id.clone();
        app.toggle_like();
        assert_eq!(app.settings.liked_videos, vec![id]);
        app.toggle_like();
        assert!(app.settings.liked_videos.is_empty());
    }

    #[test]
    fn test_open_missing_document() {
        let (mut app, dir) = create_test_app(&[]);
        app.start_open_document();
        app.input = dir.path().join("missing.pdf").display().to_string();
        app.submit_input().unwrap();
        assert_eq!(app.ui_mode, UiMode::Documents);
        assert_eq!(app.current_message().unwrap().kind, MessageKind::Error);
    }

    #[test]
    fn test_chat_reply_arrives() {
        let (mut app, _dir) = create_test_app(&[("primary", Ok("Try a 25 minute sprint."))]);
        app.open_chat();
        app.input = "How do I start?".into();
        app.submit_input().unwrap();
        assert!(app.chat.is_pending());

        wait_for_reply(&mut app);
        assert!(!app.chat.is_pending());
        assert_eq!(app.chat.history()[1].content, "Try a 25 minute sprint.");
    }

    #[test]
    fn test_focus_breakdown_adds_sub_tasks() {
        let (mut app, _dir) = create_test_app(&[("primary", Ok("1. Gather data\n2. Write summary"))]);
        app.enter_focus();
        assert_eq!(app.ui_mode, UiMode::Focus);

        app.ask_assistant(AssistPrompt::Breakdown);
        wait_for_reply(&mut app);
        assert_eq!(app.assist.suggestions().len(), 2);

        app.add_suggested_sub_tasks().unwrap();
        let task = app.focus_task().unwrap();
        assert_eq!(task.sub_tasks.len(), 2);
        assert_eq!(task.sub_tasks[1].text, "Write summary");
    }

    #[test]
    fn test_focus_all_done_message() {
        let (mut app, _dir) = create_test_app(&[]);
        let (task_id, _) = app.selected_ids().unwrap();
        app.add_sub_task(task_id, "Only step").unwrap();
        app.enter_focus();
        app.focus_toggle_sub().unwrap();
        assert_eq!(
            app.current_message().unwrap().text,
            "All sub-tasks complete! Great job!"
        );
    }

    #[test]
    fn test_focus_ai_disabled_ignores_prompts() {
        let (mut app, _dir) = create_test_app(&[]);
        app.enter_focus();
        app.toggle_focus_ai();
        app.ask_assistant(AssistPrompt::Stuck);
        assert!(!app.assist.is_pending());
        assert!(app.settings_dirty);
    }

    #[test]
    fn test_messages_expire() {
        let (mut app, _dir) = create_test_app(&[]);
        app.info("hello");
        app.tick(Instant::now() + MESSAGE_TTL + Duration::from_millis(1)).unwrap();
        assert!(app.current_message().is_none());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/a.pdf"), PathBuf::from("/tmp/a.pdf"));
    }
}
