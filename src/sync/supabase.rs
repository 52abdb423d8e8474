use super::rows::{SubTaskRow, TaskRow};
use super::{AuthUser, Session, SyncError, TaskRemote, UserDataRemote};
use crate::domain::{Mood, SubTask, Task, Video};
use chrono::Utc;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Connection settings for the hosted backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout: Duration,
}

fn build_client(timeout: Duration) -> Result<Client, SyncError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Pull a human-readable message out of an error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|k| v[*k].as_str().map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

fn check(resp: Response) -> Result<Response, SyncError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(SyncError::Status {
        status: status.as_u16(),
        body: error_message(&body),
    })
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| Utc::now().timestamp() + self.expires_in.unwrap_or(3600));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    SignedIn(Session),
    /// A confirmation / magic link was emailed instead
    NeedsEmailConfirmation,
}

const EMAIL_NOT_CONFIRMED: &str = "Email not confirmed";
const ALREADY_REGISTERED: &str = "already registered";

/// Next step after a password sign-in or sign-up response
#[derive(Debug, PartialEq)]
enum AuthStep {
    SignedIn(Session),
    /// The error body matched the magic-link marker
    SendMagicLink,
    /// 2xx without tokens: the account waits for email confirmation
    AwaitConfirmation,
}

fn json_body(resp: Response) -> Result<Value, SyncError> {
    check(resp)?
        .json()
        .map_err(|e| SyncError::Decode(e.to_string()))
}

fn classify_auth(result: Result<Value, SyncError>, magic_link_marker: &str) -> Result<AuthStep, SyncError> {
    match result {
        Ok(value) if value.get("access_token").is_some() => {
            let token: TokenResponse =
                serde_json::from_value(value).map_err(|e| SyncError::Decode(e.to_string()))?;
            Ok(AuthStep::SignedIn(token.into_session()))
        }
        Ok(_) => Ok(AuthStep::AwaitConfirmation),
        Err(SyncError::Status { body, .. }) if body.contains(magic_link_marker) => {
            Ok(AuthStep::SendMagicLink)
        }
        Err(e) => Err(e),
    }
}

/// Email/password and magic-link auth against the hosted auth REST API
pub struct AuthClient {
    http: Client,
    config: BackendConfig,
}

impl AuthClient {
    pub fn new(config: BackendConfig) -> Result<Self, SyncError> {
        Ok(Self {
            http: build_client(config.timeout)?,
            config,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url.trim_end_matches('/'), path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(self.endpoint(path))
            .header("apikey", &self.config.anon_key)
    }

    pub fn sign_in(&self, email: &str, password: &str) -> Result<AuthOutcome, SyncError> {
        let resp = self
            .post("token")
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()?;
        let step = classify_auth(json_body(resp), EMAIL_NOT_CONFIRMED)?;
        self.finish(email, step)
    }

    pub fn sign_up(&self, email: &str, password: &str) -> Result<AuthOutcome, SyncError> {
        let resp = self
            .post("signup")
            .json(&json!({ "email": email, "password": password }))
            .send()?;
        let step = classify_auth(json_body(resp), ALREADY_REGISTERED)?;
        self.finish(email, step)
    }

    fn finish(&self, email: &str, step: AuthStep) -> Result<AuthOutcome, SyncError> {
        match step {
            AuthStep::SignedIn(session) => {
                info!(email, "signed in");
                Ok(AuthOutcome::SignedIn(session))
            }
            AuthStep::SendMagicLink => {
                info!(email, "password sign-in unavailable, sending magic link");
                self.send_magic_link(email)?;
                Ok(AuthOutcome::NeedsEmailConfirmation)
            }
            AuthStep::AwaitConfirmation => {
                info!(email, "confirmation required");
                Ok(AuthOutcome::NeedsEmailConfirmation)
            }
        }
    }

    pub fn send_magic_link(&self, email: &str) -> Result<(), SyncError> {
        let resp = self
            .post("otp")
            .json(&json!({ "email": email, "create_user": true }))
            .send()?;
        check(resp)?;
        Ok(())
    }

    pub fn refresh(&self, refresh_token: &str) -> Result<Session, SyncError> {
        let resp = self
            .post("token")
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }))
            .send()?;
        let token: TokenResponse = check(resp)?
            .json()
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        Ok(token.into_session())
    }

    pub fn sign_out(&self, session: &Session) -> Result<(), SyncError> {
        let resp = self.post("logout").bearer_auth(&session.access_token).send()?;
        check(resp)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// PostgREST data access for one signed-in user
#[derive(Clone)]
pub struct SupabaseData {
    http: Client,
    config: BackendConfig,
    session: Session,
}

impl SupabaseData {
    pub fn new(config: BackendConfig, session: Session) -> Result<Self, SyncError> {
        Ok(Self {
            http: build_client(config.timeout)?,
            config,
            session,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.session.user.id
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table);
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.session.access_token)
    }

    fn first_row<T: for<'de> Deserialize<'de>>(resp: Response) -> Result<T, SyncError> {
        let mut rows: Vec<T> = check(resp)?
            .json()
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        if rows.is_empty() {
            return Err(SyncError::Decode("empty representation".to_string()));
        }
        Ok(rows.remove(0))
    }

    pub fn get_profile(&self) -> Result<Option<Profile>, SyncError> {
        let resp = self
            .request(Method::GET, "user_profiles")
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", self.user_id()))])
            .send()?;
        let mut rows: Vec<Profile> = check(resp)?
            .json()
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        Ok(if rows.is_empty() { None } else { Some(rows.remove(0)) })
    }

    pub fn create_profile(&self, display_name: Option<&str>) -> Result<Profile, SyncError> {
        let resp = self
            .request(Method::POST, "user_profiles")
            .header("Prefer", "return=representation")
            .json(&json!({
                "id": self.user_id(),
                "display_name": display_name,
                "avatar_url": Value::Null,
            }))
            .send()?;
        Self::first_row(resp)
    }
}

impl UserDataRemote for SupabaseData {
    /// Upsert `user_settings.current_mood`
    fn save_mood(&self, mood: Mood) -> Result<(), SyncError> {
        let resp = self
            .request(Method::POST, "user_settings")
            .header("Prefer", "resolution=merge-duplicates")
            .json(&json!({
                "id": self.user_id(),
                "current_mood": mood.key(),
                "updated_at": Utc::now().to_rfc3339(),
            }))
            .send()?;
        check(resp)?;
        debug!(mood = mood.key(), "mood saved");
        Ok(())
    }

    fn save_liked_video(&self, video: &Video) -> Result<(), SyncError> {
        let resp = self
            .request(Method::POST, "liked_videos")
            .json(&json!({
                "user_id": self.user_id(),
                "video_id": video.id,
                "title": video.title,
                "channel": video.channel,
            }))
            .send()?;
        check(resp)?;
        Ok(())
    }

    /// Liked video ids, newest first
    fn liked_videos(&self) -> Result<Vec<String>, SyncError> {
        let resp = self
            .request(Method::GET, "liked_videos")
            .query(&[
                ("select", "video_id".to_string()),
                ("user_id", format!("eq.{}", self.user_id())),
                ("order", "created_at.desc".to_string()),
            ])
            .send()?;
        let rows: Vec<Value> = check(resp)?
            .json()
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        Ok(rows
            .iter()
            .filter_map(|r| r["video_id"].as_str().map(str::to_string))
            .collect())
    }

    fn remove_liked_video(&self, video_id: &str) -> Result<(), SyncError> {
        let resp = self
            .request(Method::DELETE, "liked_videos")
            .query(&[
                ("video_id", format!("eq.{}", video_id)),
                ("user_id", format!("eq.{}", self.user_id())),
            ])
            .send()?;
        check(resp)?;
        Ok(())
    }
}

impl TaskRemote for SupabaseData {
    fn fetch_tasks(&self) -> Result<Vec<Task>, SyncError> {
        let resp = self
            .request(Method::GET, "tasks")
            .query(&[
                ("select", "*,sub_tasks(*)".to_string()),
                ("user_id", format!("eq.{}", self.user_id())),
                ("order", "created_at.desc".to_string()),
            ])
            .send()?;
        let rows: Vec<TaskRow> = check(resp)?
            .json()
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        Ok(rows.into_iter().map(TaskRow::into_task).collect())
    }

    fn create_task(&self, task: &Task) -> Result<Task, SyncError> {
        let resp = self
            .request(Method::POST, "tasks")
            .header("Prefer", "return=representation")
            .json(&TaskRow::from_task(task, self.user_id()))
            .send()?;
        let row: TaskRow = Self::first_row(resp)?;
        Ok(row.into_task())
    }

    fn update_task(&self, task: &Task) -> Result<(), SyncError> {
        let row = TaskRow::from_task(task, self.user_id());
        let resp = self
            .request(Method::PATCH, "tasks")
            .query(&[
                ("id", format!("eq.{}", task.id)),
                ("user_id", format!("eq.{}", self.user_id())),
            ])
            .json(&json!({
                "text": row.text,
                "completed": row.completed,
                "category": row.category,
                "priority": row.priority,
                "due_date": row.due_date,
                "notes": row.notes,
                "updated_at": Utc::now().to_rfc3339(),
            }))
            .send()?;
        check(resp)?;
        Ok(())
    }

    fn delete_task(&self, id: Uuid) -> Result<(), SyncError> {
        let resp = self
            .request(Method::DELETE, "tasks")
            .query(&[
                ("id", format!("eq.{}", id)),
                ("user_id", format!("eq.{}", self.user_id())),
            ])
            .send()?;
        check(resp)?;
        Ok(())
    }

    fn create_sub_task(&self, task_id: Uuid, sub: &SubTask) -> Result<SubTask, SyncError> {
        let resp = self
            .request(Method::POST, "sub_tasks")
            .header("Prefer", "return=representation")
            .json(&SubTaskRow::from_sub_task(sub, Some(task_id)))
            .send()?;
        let row: SubTaskRow = Self::first_row(resp)?;
        Ok(row.into_sub_task())
    }

    fn update_sub_task(&self, sub: &SubTask) -> Result<(), SyncError> {
        let row = SubTaskRow::from_sub_task(sub, None);
        let resp = self
            .request(Method::PATCH, "sub_tasks")
            .query(&[("id", format!("eq.{}", sub.id))])
            .json(&json!({
                "text": row.text,
                "completed": row.completed,
                "status": row.status,
                "due_date": row.due_date,
                "notes": row.notes,
                "updated_at": Utc::now().to_rfc3339(),
            }))
            .send()?;
        check(resp)?;
        Ok(())
    }

    fn delete_sub_task(&self, id: Uuid) -> Result<(), SyncError> {
        let resp = self
            .request(Method::DELETE, "sub_tasks")
            .query(&[("id", format!("eq.{}", id))])
            .send()?;
        check(resp)?;
        Ok(())
    }
}
