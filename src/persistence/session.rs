use crate::sync::Session;
use anyhow::Result;
use std::path::Path;
use tracing::warn;

use super::files::{atomic_write, read_file, remove_file};

/// Load the saved sign-in session, if any
pub fn load_session<P: AsRef<Path>>(path: P) -> Result<Option<Session>> {
    let path = path.as_ref();
    let content = read_file(path)?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str(&content) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable session file, ignoring");
            Ok(None)
        }
    }
}

pub fn save_session<P: AsRef<Path>>(path: P, session: &Session) -> Result<()> {
    let json = serde_json::to_string_pretty(session)?;
    atomic_write(path, &json)
}

pub fn clear_session<P: AsRef<Path>>(path: P) -> Result<()> {
    remove_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::AuthUser;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn session() -> Session {
        Session {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at: 1_700_000_000,
            user: AuthUser {
                id: "user-1".into(),
                email: Some("ada@example.com".into()),
            },
        }
    }

    #[test]
    fn test_session_lifecycle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        assert_eq!(load_session(&path).unwrap(), None);

        save_session(&path, &session()).unwrap();
        assert_eq!(load_session(&path).unwrap(), Some(session()));

        clear_session(&path).unwrap();
        assert!(!path.exists());
        clear_session(&path).unwrap();
    }

    #[test]
    fn test_garbage_session_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_session(&path).unwrap(), None);
    }
}
