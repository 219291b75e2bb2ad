use std::{
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";
pub const DEFAULT_SECRETS_FILE: &str = "secrets.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read secrets file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Malformed secrets file {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("Failed to prepare database file {path}: {source}")]
    Prepare { path: PathBuf, source: io::Error },
}

/// Contents of the local secrets file.
#[derive(Debug, Clone, Deserialize)]
pub struct Secrets {
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
}

impl Settings {
    /// Reads `DATABASE_URL`, then the secrets file (`TODO_SECRETS_FILE` or `secrets.json`).
    /// Call `dotenvy::dotenv()` first for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let secrets_file = std::env::var("TODO_SECRETS_FILE").unwrap_or_else(|_| DEFAULT_SECRETS_FILE.to_string());
        Self::resolve(std::env::var("DATABASE_URL").ok(), Path::new(&secrets_file))
    }

    pub fn resolve(env_url: Option<String>, secrets_file: &Path) -> Result<Self, ConfigError> {
        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            return Ok(Self { database_url: url });
        }
        let from_file = match fs::read_to_string(secrets_file) {
            Ok(raw) => {
                let secrets: Secrets = serde_json::from_str(&raw)
                    .map_err(|source| ConfigError::Parse { path: secrets_file.to_path_buf(), source })?;
                if secrets.database_url.is_none() {
                    tracing::warn!(path = %secrets_file.display(), "secrets file has no database_url, ignoring");
                }
                secrets.database_url
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => return Err(ConfigError::Read { path: secrets_file.to_path_buf(), source }),
        };
        Ok(Self { database_url: from_file.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()) })
    }
}

/// Ensures a file-backed SQLite URL points at an existing file.
pub fn prepare_sqlite_file(database_url: &str) -> Result<(), ConfigError> {
    if database_url.starts_with("sqlite::memory:") { return Ok(()); }
    let Some(path) = database_url.strip_prefix("sqlite://") else { return Ok(()) };
    let path = path.split('?').next().unwrap_or(path);
    // On Windows, absolute paths may look like /C:/path; strip the leading slash
    let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
        &path[1..]
    } else {
        path
    };
    let p = Path::new(path);
    let prepare = |source| ConfigError::Prepare { path: p.to_path_buf(), source };
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() { fs::create_dir_all(parent).map_err(prepare)?; }
    }
    if !p.exists() {
        OpenOptions::new().create(true).append(true).open(p).map_err(prepare)?;
    }
    Ok(())
}
