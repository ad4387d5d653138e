//! Application configuration.
//!
//! Everything comes from environment variables with sensible defaults; the
//! data directory (session token, shell history, log file) lives under the
//! user's home directory.

use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default idle duration before the inactivity watchdog logs out.
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the REST backend.
    pub api_url: Url,
    /// Directory holding the session token, history and log files.
    pub data_dir: PathBuf,
    /// Idle duration after which the session is logged out.
    pub idle_timeout: Duration,
    /// Minimum level recorded in the log file.
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// Recognized variables: `PASSLINK_API_URL`, `PASSLINK_DATA_DIR`,
    /// `PASSLINK_IDLE_TIMEOUT_SECS`, `PASSLINK_LOG`.
    pub fn load() -> Result<Self> {
        let api_url =
            std::env::var("PASSLINK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url =
            Url::parse(&api_url).with_context(|| format!("Invalid PASSLINK_API_URL: {api_url}"))?;

        let data_dir = match std::env::var("PASSLINK_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir()?,
        };

        let idle_timeout = match std::env::var("PASSLINK_IDLE_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(
                secs.parse()
                    .with_context(|| format!("Invalid PASSLINK_IDLE_TIMEOUT_SECS: {secs}"))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
        };

        let log_level = match std::env::var("PASSLINK_LOG") {
            Ok(level) => level
                .parse()
                .map_err(|_| anyhow!("Invalid PASSLINK_LOG level: {level}"))?,
            Err(_) => LevelFilter::Info,
        };

        Ok(Self {
            api_url,
            data_dir,
            idle_timeout,
            log_level,
        })
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("passlink.log")
    }

    /// Creates the data directory if it does not exist yet.
    pub fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }
}

fn default_data_dir() -> Result<PathBuf> {
    dirs_next::home_dir()
        .map(|home| home.join(".passlink"))
        .ok_or_else(|| anyhow!("Could not determine home directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(data_dir: &str) -> AppConfig {
        AppConfig {
            api_url: Url::parse("http://localhost:3000").unwrap(),
            data_dir: PathBuf::from(data_dir),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            log_level: LevelFilter::Info,
        }
    }

    #[test]
    fn test_paths_derive_from_data_dir() {
        let config = test_config("/tmp/passlink-test");

        assert_eq!(
            config.session_path(),
            PathBuf::from("/tmp/passlink-test/session.json")
        );
        assert_eq!(
            config.history_path(),
            PathBuf::from("/tmp/passlink-test/history")
        );
        assert_eq!(
            config.log_path(),
            PathBuf::from("/tmp/passlink-test/passlink.log")
        );
    }

    #[test]
    fn test_ensure_data_dir_creates_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("data");
        let mut config = test_config("ignored");
        config.data_dir = dir.clone();

        config.ensure_data_dir().unwrap();
        assert!(dir.is_dir());

        // Idempotent.
        config.ensure_data_dir().unwrap();
    }
}
