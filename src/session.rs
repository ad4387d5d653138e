//! Persisted session token.
//!
//! The bearer token is the only state the client keeps between runs. It
//! lives in a small JSON file under the data directory, stored under the
//! fixed key `token`, and is removed on logout and account deletion.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

/// Loads, saves and clears the persisted session token.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the persisted token, if a session exists.
    ///
    /// A missing file means no session; an unreadable file is an error so
    /// the caller can decide whether to start anonymous.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let session: SessionFile = serde_json::from_str(&content)?;
        Ok(Some(session.token))
    }

    pub fn save(&self, token: &str) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| anyhow!("Session path has no parent directory"))?;
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&SessionFile {
            token: token.to_string(),
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Removes the persisted token. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
