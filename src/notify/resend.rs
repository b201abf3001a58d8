use std::time::Duration;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{result_html, DeliveryReceipt, ResultAttachment, ResultMailer};

/// Sends through the Resend HTTP API (`POST {api_base}/emails`).
#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    api_base: String,
    from: String,
    subject: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ResendAttachment<'a> {
    filename: &'a str,
    /// Base64 of the raw file bytes.
    content: String,
}

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: String,
    attachments: Vec<ResendAttachment<'a>>,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    #[serde(default)]
    id: Option<String>,
}

impl ResendMailer {
    pub fn new(api_key: String, api_base: String, from: String, subject: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            from,
            subject,
            timeout: Duration::from_secs(10),
        }
    }

    fn payload<'a>(&'a self, to: &'a str, att: &'a ResultAttachment) -> ResendEmail<'a> {
        ResendEmail {
            from: &self.from,
            to: vec![to],
            subject: &self.subject,
            html: result_html(&Utc::now().to_rfc3339()),
            attachments: vec![ResendAttachment {
                filename: &att.filename,
                content: STANDARD.encode(&att.content),
            }],
        }
    }
}

#[async_trait::async_trait]
impl ResultMailer for ResendMailer {
    fn name(&self) -> &'static str {
        "resend"
    }

    async fn send_result(&self, to: &str, attachment: &ResultAttachment) -> Result<DeliveryReceipt> {
        let url = format!("{}/emails", self.api_base);
        let rsp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&self.payload(to, attachment))
            .send()
            .await
            .context("resend post")?
            .error_for_status()
            .context("resend non-2xx")?;

        // A 2xx without an id still means the message was accepted.
        let id = match rsp.json::<ResendResponse>().await {
            Ok(body) => body.id,
            Err(e) => {
                tracing::warn!(error = %e, "resend response had no readable body");
                None
            }
        };
        if id.is_none() {
            tracing::warn!(to, "resend accepted the email but returned no id");
        } else {
            tracing::info!(to, id = id.as_deref().unwrap_or_default(), "result email sent");
        }

        Ok(DeliveryReceipt {
            backend: self.name(),
            id,
        })
    }
}
