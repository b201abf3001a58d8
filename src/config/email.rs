// src/config/email.rs
use std::fmt;

use super::ConfigError;

/// Default sender; Resend accepts it without a verified domain.
pub const DEFAULT_FROM: &str = "onboarding@resend.dev";
pub const DEFAULT_RESEND_API_BASE: &str = "https://api.resend.com";
pub const DEFAULT_SUBJECT: &str = "TOPSIS Analysis Results";

/// Which delivery channel carries the result file.
#[derive(Clone, PartialEq, Eq)]
pub enum EmailBackend {
    Disabled,
    Resend {
        api_key: String,
        api_base: String,
    },
    Smtp {
        host: String,
        username: String,
        password: String,
    },
}

// Keep secrets out of logs.
impl fmt::Debug for EmailBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailBackend::Disabled => f.write_str("Disabled"),
            EmailBackend::Resend { api_base, .. } => f
                .debug_struct("Resend")
                .field("api_key", &"***")
                .field("api_base", api_base)
                .finish(),
            EmailBackend::Smtp { host, username, .. } => f
                .debug_struct("Smtp")
                .field("host", host)
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

impl EmailBackend {
    pub fn name(&self) -> &'static str {
        match self {
            EmailBackend::Disabled => "disabled",
            EmailBackend::Resend { .. } => "resend",
            EmailBackend::Smtp { .. } => "smtp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub backend: EmailBackend,
    pub from: String,
    pub subject: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            backend: EmailBackend::Disabled,
            from: DEFAULT_FROM.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }
}

impl EmailConfig {
    /// Resolution order:
    /// 1) `RESEND_API_KEY` → Resend (`RESEND_API_BASE` optional)
    /// 2) `SMTP_HOST` → SMTP (`SMTP_USER` and `SMTP_PASS` required)
    /// 3) nothing → delivery disabled
    ///
    /// Sender: `TOPSIS_FROM_EMAIL`, else `RESEND_FROM_EMAIL`, else the Resend test sender.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = if let Some(api_key) = non_empty("RESEND_API_KEY") {
            EmailBackend::Resend {
                api_key,
                api_base: non_empty("RESEND_API_BASE")
                    .unwrap_or_else(|| DEFAULT_RESEND_API_BASE.to_string()),
            }
        } else if let Some(host) = non_empty("SMTP_HOST") {
            EmailBackend::Smtp {
                host,
                username: non_empty("SMTP_USER").ok_or(ConfigError::MissingRequired("SMTP_USER"))?,
                password: non_empty("SMTP_PASS").ok_or(ConfigError::MissingRequired("SMTP_PASS"))?,
            }
        } else {
            EmailBackend::Disabled
        };

        let from = non_empty("TOPSIS_FROM_EMAIL")
            .or_else(|| non_empty("RESEND_FROM_EMAIL"))
            .unwrap_or_else(|| DEFAULT_FROM.to_string());
        if !from.contains('@') {
            return Err(ConfigError::InvalidFromEmail(from));
        }

        Ok(Self {
            backend,
            from,
            subject: non_empty("TOPSIS_EMAIL_SUBJECT").unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.backend != EmailBackend::Disabled
    }
}
