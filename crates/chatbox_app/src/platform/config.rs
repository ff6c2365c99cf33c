use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chatbox_engine::BackendSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "chatbox.ron";
pub const BACKEND_URL_ENV: &str = "CHATBOX_BACKEND_URL";
pub const LOG_FILENAME: &str = "chatbox.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("backend url must be an absolute http(s) url, got {0:?}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub ask_path: String,
    pub upload_path: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    /// Debug-level logging.
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let backend = BackendSettings::default();
        Self {
            base_url: backend.base_url,
            ask_path: backend.ask_path,
            upload_path: backend.upload_path,
            connect_timeout_secs: backend.connect_timeout.map(|timeout| timeout.as_secs()),
            request_timeout_secs: backend.request_timeout.map(|timeout| timeout.as_secs()),
            log_destination: LogDestination::default(),
            log_file: PathBuf::from(LOG_FILENAME),
            verbose: false,
        }
    }
}

impl AppConfig {
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }
        self
    }

    pub fn backend_settings(&self) -> Result<BackendSettings, ConfigError> {
        let valid = url::Url::parse(&self.base_url)
            .map(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.has_host())
            .unwrap_or(false);
        if !valid {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }

        Ok(BackendSettings {
            base_url: self.base_url.clone(),
            ask_path: self.ask_path.clone(),
            upload_path: self.upload_path.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Reads the config file; `Ok(None)` when there is none.
pub fn load(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str::<AppConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}
