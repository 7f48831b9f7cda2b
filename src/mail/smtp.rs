//! Email sender using an SMTP relay.

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::info;

use super::Notifier;
use crate::core::config::AppConfig;
use crate::errors::BotError;

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl SmtpSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            username: config.smtp_username.clone(),
            password: config.smtp_password.clone(),
            timeout: config.call_timeout(),
        }
    }
}

/// Sends plain-text digest emails over STARTTLS.
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    /// # Errors
    ///
    /// Returns an error if the relay host cannot be configured for STARTTLS.
    pub fn new(settings: &SmtpSettings) -> Result<Self, BotError> {
        let creds = Credentials::new(settings.username.clone(), settings.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .timeout(Some(settings.timeout))
            .credentials(creds)
            .build();
        Ok(Self { mailer })
    }
}

/// Builds the plain-text message for one digest article.
///
/// # Errors
///
/// Returns an error if either address is malformed.
pub fn build_message(
    subject: &str,
    from_address: &str,
    to_address: &str,
    body: &str,
) -> Result<Message, BotError> {
    let from: Mailbox = from_address.trim().parse()?;
    let to: Mailbox = to_address.trim().parse()?;

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())?)
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(
        &self,
        subject: &str,
        from_address: &str,
        to_address: &str,
        body: &str,
    ) -> Result<(), BotError> {
        let email = build_message(subject, from_address, to_address, body)?;
        self.mailer.send(email).await?;

        info!(to = %to_address, subject = subject, "Email sent successfully");
        Ok(())
    }
}
