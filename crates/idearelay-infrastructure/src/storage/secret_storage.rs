//! Secret configuration file storage.
//!
//! Provides secure loading of secret configuration from
//! ~/.config/idearelay/secret.json.

use crate::paths::RelayPaths;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during secret storage operations.
#[derive(Error, Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    #[error("Configuration file not found at: {0}")]
    NotFound(PathBuf),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config directory not found.
    #[error("Could not determine home directory")]
    ConfigDirNotFound,
}

/// OpenRouter credential section of secret.json.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterSecret {
    pub api_key: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// SMTP credential section of secret.json.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpSecret {
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

/// The full secret configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openrouter: Option<OpenRouterSecret>,
    #[serde(default)]
    pub smtp: Option<SmtpSecret>,
}

/// Storage for the secret configuration file (secret.json).
///
/// Responsibilities:
/// - Load secret.json from the application config directory
/// - Parse JSON into the SecretConfig model
/// - Provide error handling for missing or invalid files
///
/// Does NOT:
/// - Write or modify secret files (read-only)
/// - Validate API keys or credentials
///
/// # Security Note
///
/// This storage reads plaintext JSON files. The secret.json file should
/// have appropriate file permissions (e.g., 600) to prevent unauthorized
/// access, and its contents must never be logged.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a new SecretStorage with the default path.
    pub fn new() -> Result<Self, SecretStorageError> {
        let path = RelayPaths::secret_file()
            .map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a new SecretStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the secret configuration from the JSON file.
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Returns the path to the secret file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
