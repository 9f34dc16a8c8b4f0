//! Persisted session: the access token cached between CLI invocations,
//! stored as JSON under the XDG state directory.

use super::Session;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub fn session_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dermaflow")?;
    let state_dir = xdg_dirs.get_state_home().join("dermaflow");
    Ok(state_dir.join("session.json"))
}

/// Load the cached session, if any. A missing or corrupt file is treated as
/// signed out rather than an error.
pub fn load_session() -> Option<Session> {
    session_path().ok().and_then(|p| load_session_from(&p))
}

pub fn load_session_from(path: &Path) -> Option<Session> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("discarding unreadable session file: {}", e);
            None
        }
    }
}

pub fn save_session(session: &Session) -> Result<()> {
    save_session_to(&session_path()?, session)
}

pub fn save_session_to(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(session)?)?;
    Ok(())
}

pub fn clear_session() -> Result<()> {
    clear_session_at(&session_path()?)
}

pub fn clear_session_at(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Identity;
    use uuid::Uuid;

    fn session() -> Session {
        Session {
            access_token: "token-123".to_string(),
            identity: Identity {
                id: Uuid::new_v4(),
                email: Some("nurse@example.com".to_string()),
            },
        }
    }

    #[test]
    fn save_load_clear_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("session.json");

        assert!(load_session_from(&path).is_none());

        let s = session();
        save_session_to(&path, &s).unwrap();
        assert_eq!(load_session_from(&path), Some(s));

        clear_session_at(&path).unwrap();
        assert!(load_session_from(&path).is_none());
        // Clearing again is a no-op.
        clear_session_at(&path).unwrap();
    }

    #[test]
    fn corrupt_file_reads_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        assert!(load_session_from(&path).is_none());
    }
}
