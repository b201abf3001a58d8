// src/notify/mod.rs
//! Delivery of ranked tables to end users.

pub mod email;
pub mod resend;

use std::sync::Arc;

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{EmailBackend, EmailConfig};

pub use email::SmtpMailer;
pub use resend::ResendMailer;

/// File name used for the attached result.
pub const RESULT_FILENAME: &str = "result.csv";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static email regex")
});

/// Same address shape the upload form accepts.
pub fn is_valid_email(addr: &str) -> bool {
    EMAIL_RE.is_match(addr)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultAttachment {
    pub filename: String,
    pub content: Vec<u8>,
}

impl ResultAttachment {
    pub fn csv(content: Vec<u8>) -> Self {
        Self {
            filename: RESULT_FILENAME.to_string(),
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub backend: &'static str,
    /// Provider message id, when the provider returns one.
    pub id: Option<String>,
}

#[async_trait::async_trait]
pub trait ResultMailer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send_result(&self, to: &str, attachment: &ResultAttachment) -> Result<DeliveryReceipt>;
}

/// Used when no backend is configured; every send fails.
pub struct DisabledMailer;

#[async_trait::async_trait]
impl ResultMailer for DisabledMailer {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn send_result(&self, to: &str, _attachment: &ResultAttachment) -> Result<DeliveryReceipt> {
        tracing::warn!(to, "email delivery is not configured");
        bail!("email delivery is not configured")
    }
}

/// Pick the mailer matching the configured backend.
pub fn mailer_from_config(cfg: &EmailConfig) -> Result<Arc<dyn ResultMailer>> {
    Ok(match &cfg.backend {
        EmailBackend::Disabled => Arc::new(DisabledMailer),
        EmailBackend::Resend { api_key, api_base } => Arc::new(ResendMailer::new(
            api_key.clone(),
            api_base.clone(),
            cfg.from.clone(),
            cfg.subject.clone(),
        )),
        EmailBackend::Smtp {
            host,
            username,
            password,
        } => Arc::new(SmtpMailer::new(
            host,
            username.clone(),
            password.clone(),
            &cfg.from,
            cfg.subject.clone(),
        )?),
    })
}

/// HTML body shared by all backends.
pub(crate) fn result_html(generated_at: &str) -> String {
    format!(
        "<p>Please find attached your TOPSIS analysis results.</p>\
         <p style=\"color:#888\">Generated {generated_at}</p>"
    )
}
