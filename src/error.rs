//! Error type shared by the launcher modules.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file {path} not found")]
    ConfigNotFound { path: PathBuf },

    #[error("failed to parse TOML config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported platform `{0}`")]
    UnsupportedPlatform(String),

    #[error("`{command}` failed to start: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("download of {url} failed: {reason}")]
    Download { url: String, reason: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
