pub mod files;
pub mod local;
pub mod session;
pub mod settings;

pub use files::{
    atomic_write, ensure_data_dir, get_data_dir, init_local_data_dir, read_file, remove_file,
    report_file, LOG_FILE, SESSION_FILE, SETTINGS_FILE, TASKS_FILE,
};
pub use local::LocalTaskStore;
pub use session::{clear_session, load_session, save_session};
pub use settings::{load_settings, save_settings, FocusModeSettings, FocusSession, Settings};
