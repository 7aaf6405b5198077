//! Outreach email transport. `SmtpMailer` delivers over SMTP when
//! configured; `LogMailer` stands in otherwise so sends still succeed and
//! get logged. The send endpoint records one log entry per attempt either
//! way.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::info;

use crate::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mailbox address: {0}")]
    Address(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),

    #[error("mail task failed: {0}")]
    Task(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(
                self.config
                    .from
                    .parse()
                    .map_err(|e| MailError::Address(format!("from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| MailError::Address(format!("to address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let transport = SmtpTransport::relay(&self.config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.user.clone(),
                self.config.pass.clone(),
            ))
            .build();

        // lettre's SmtpTransport is blocking; keep it off the async workers.
        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| MailError::Task(e.to_string()))?
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }
}

/// Null object used when SMTP is not configured.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, _subject: &str, _body: &str) -> Result<(), MailError> {
        info!("SMTP transport not configured; logging outreach email to {to}");
        Ok(())
    }
}
