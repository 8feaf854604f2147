//! Outbound email delivery.

mod playlist_email;

pub use playlist_email::compose_playlist_email;

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Sender credentials, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct EmailCredentials {
    pub address: String,
    pub app_password: String,
}

/// A fully composed message, ready for any transport.
#[derive(Debug, Clone)]
pub struct PlaylistEmail {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Delivery interface. The HTTP layer only learns success or failure; the
/// reason stays in the logs.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, email: &PlaylistEmail) -> Result<()>;
}

/// SMTP delivery over STARTTLS with credentials auth.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(host: &str, port: u16, credentials: EmailCredentials) -> Result<Self> {
        let from = credentials
            .address
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid sender address: {}", credentials.address))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .with_context(|| format!("Invalid SMTP relay host: {}", host))?
            .port(port)
            .credentials(Credentials::new(
                credentials.address,
                credentials.app_password,
            ))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, email: &PlaylistEmail) -> Result<()> {
        let to = to
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid recipient address: {}", to))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))
            .context("Failed to build email message")?;

        self.transport
            .send(message)
            .await
            .context("SMTP delivery failed")?;

        Ok(())
    }
}
