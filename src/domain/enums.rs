/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    AddingSubtask,
    EditingTask,
    EditingNotes,
    EditingDueDate,
    Help,
    MoodSelector,
    Chat,
    MusicSearch,
    Documents,
    OpeningDocument,
    TimerSettings,
    EditingFocusMinutes,
    EditingBreakMinutes,
    Focus,
    FocusAsking,
    FocusAddingSubtask,
    FocusEditingNotes,
}

impl UiMode {
    /// Modes where keystrokes go into a single-line text buffer
    pub fn is_text_entry(&self) -> bool {
        matches!(
            self,
            UiMode::AddingTask
                | UiMode::AddingSubtask
                | UiMode::EditingTask
                | UiMode::EditingNotes
                | UiMode::EditingDueDate
                | UiMode::Chat
                | UiMode::MusicSearch
                | UiMode::OpeningDocument
                | UiMode::EditingFocusMinutes
                | UiMode::EditingBreakMinutes
                | UiMode::FocusAsking
                | UiMode::FocusAddingSubtask
                | UiMode::FocusEditingNotes
        )
    }

    /// Modes that belong to the focus-mode overlay
    pub fn in_focus(&self) -> bool {
        matches!(
            self,
            UiMode::Focus
                | UiMode::FocusAsking
                | UiMode::FocusAddingSubtask
                | UiMode::FocusEditingNotes
        )
    }

    /// Title shown on the input form for text-entry modes
    pub fn prompt(&self) -> &'static str {
        match self {
            UiMode::AddingTask => "Add Task",
            UiMode::AddingSubtask | UiMode::FocusAddingSubtask => "Add Sub-task",
            UiMode::EditingTask => "Rename",
            UiMode::EditingNotes | UiMode::FocusEditingNotes => "Notes",
            UiMode::EditingDueDate => "Due date (today, tomorrow, +N, YYYY-MM-DD, empty clears)",
            UiMode::Chat => "Message",
            UiMode::MusicSearch => "Search music or paste a YouTube link",
            UiMode::OpeningDocument => "Path to PDF",
            UiMode::EditingFocusMinutes => "Custom focus minutes (1-120)",
            UiMode::EditingBreakMinutes => "Custom break minutes (1-60)",
            UiMode::FocusAsking => "Ask about this task",
            _ => "",
        }
    }
}

/// Where the hosted backend sits relative to local storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Guest,
    Cloud,
}

impl StorageMode {
    pub fn label(&self) -> &'static str {
        match self {
            StorageMode::Guest => "Guest",
            StorageMode::Cloud => "Cloud",
        }
    }
}
