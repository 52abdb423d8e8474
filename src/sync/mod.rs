//! Hosted backend: auth, REST data access, and the task repository that
//! keeps local storage and the remote in step.

pub mod repository;
pub mod rows;
pub mod supabase;

use crate::domain::{Mood, SubTask, Task, Video};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use repository::{SyncOutcome, TaskRepository};
pub use supabase::{AuthClient, AuthOutcome, SupabaseData};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Hosted backend is not configured (set NOTEFLOW_SUPABASE_URL and NOTEFLOW_SUPABASE_ANON_KEY)")]
    NotConfigured,
    #[error("Not signed in")]
    NotAuthenticated,
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Email not confirmed")]
    EmailNotConfirmed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Signed-in session as stored in session.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds
    pub expires_at: i64,
    pub user: AuthUser,
}

impl Session {
    pub fn is_expired(&self, now_unix: i64) -> bool {
        now_unix >= self.expires_at
    }
}

/// Task storage on the hosted backend, scoped to one signed-in user
pub trait TaskRemote {
    /// All tasks with their sub-tasks, newest first
    fn fetch_tasks(&self) -> Result<Vec<Task>, SyncError>;
    /// Insert a task; returns the stored row (its id is authoritative)
    fn create_task(&self, task: &Task) -> Result<Task, SyncError>;
    fn update_task(&self, task: &Task) -> Result<(), SyncError>;
    fn delete_task(&self, id: Uuid) -> Result<(), SyncError>;
    fn create_sub_task(&self, task_id: Uuid, sub: &SubTask) -> Result<SubTask, SyncError>;
    fn update_sub_task(&self, sub: &SubTask) -> Result<(), SyncError>;
    fn delete_sub_task(&self, id: Uuid) -> Result<(), SyncError>;
}

/// Per-user preferences on the hosted backend
pub trait UserDataRemote {
    fn save_mood(&self, mood: Mood) -> Result<(), SyncError>;
    fn save_liked_video(&self, video: &Video) -> Result<(), SyncError>;
    /// Liked video ids, newest first
    fn liked_videos(&self) -> Result<Vec<String>, SyncError>;
    fn remove_liked_video(&self, video_id: &str) -> Result<(), SyncError>;
}
