// src/config/mod.rs
//! Process configuration, read once at startup and passed around explicitly.
//! The engine never sees any of this.

pub mod email;

use thiserror::Error;

pub use email::{EmailBackend, EmailConfig};

/// 16 MiB, the upload cap of the web form.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("Invalid from email address: '{0}'")]
    InvalidFromEmail(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Request body cap; also bounds the table size handed to the engine.
    pub max_upload_bytes: usize,
    /// Expose `/metrics` when true (`TOPSIS_METRICS=1`).
    pub metrics_enabled: bool,
    pub email: EmailConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            metrics_enabled: false,
            email: EmailConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read from the process environment. Call `dotenvy::dotenv()` first in binaries.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_upload_bytes = match get("TOPSIS_MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidNumber {
                    var: "TOPSIS_MAX_UPLOAD_BYTES",
                    value: raw,
                })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let metrics_enabled = get("TOPSIS_METRICS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            max_upload_bytes,
            metrics_enabled,
            email: EmailConfig::from_lookup(&get)?,
        })
    }
}
