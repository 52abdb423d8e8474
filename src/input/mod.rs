pub mod handler;

pub use handler::{edit_notes_external, handle_key};
