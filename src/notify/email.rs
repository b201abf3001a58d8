use anyhow::{Context, Result};
use chrono::Utc;
use lettre::message::{header::ContentType, Attachment, Mailbox, Message, MultiPart, SinglePart};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use super::{result_html, DeliveryReceipt, ResultAttachment, ResultMailer};

/// Sends the result as a `text/csv` attachment over authenticated SMTP.
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    subject: String,
}

impl SmtpMailer {
    pub fn new(host: &str, user: String, pass: String, from: &str, subject: String) -> Result<Self> {
        let creds = Credentials::new(user, pass);
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .with_context(|| format!("invalid SMTP_HOST '{host}'"))?
            .credentials(creds)
            .build();
        let from = from
            .parse()
            .with_context(|| format!("invalid sender address '{from}'"))?;

        Ok(Self {
            mailer,
            from,
            subject,
        })
    }
}

fn build_message(
    from: &Mailbox,
    to: &str,
    subject: &str,
    attachment: &ResultAttachment,
) -> Result<Message> {
    let to: Mailbox = to
        .parse()
        .with_context(|| format!("invalid recipient '{to}'"))?;
    let csv_type = ContentType::parse("text/csv").context("csv content type")?;

    let body = MultiPart::mixed()
        .singlepart(SinglePart::html(result_html(&Utc::now().to_rfc3339())))
        .singlepart(
            Attachment::new(attachment.filename.clone()).body(attachment.content.clone(), csv_type),
        );

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(subject)
        .multipart(body)
        .context("build email")
}

#[async_trait::async_trait]
impl ResultMailer for SmtpMailer {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send_result(&self, to: &str, attachment: &ResultAttachment) -> Result<DeliveryReceipt> {
        let msg = build_message(&self.from, to, &self.subject, attachment)?;
        self.mailer.send(msg).await.context("send email")?;
        tracing::info!(to, "result email sent");
        Ok(DeliveryReceipt {
            backend: self.name(),
            id: None,
        })
    }
}
