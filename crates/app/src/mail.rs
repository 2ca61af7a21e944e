//! Outgoing mail.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail delivery failed: {0}")]
    Delivery(String),
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the account validation code to a freshly registered user.
    async fn send_validation_code(&self, email: &str, code: &str) -> Result<(), MailError>;
}

/// Mailer that only records deliveries in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_validation_code(&self, email: &str, code: &str) -> Result<(), MailError> {
        tracing::info!(to = email, "sending account validation code");
        tracing::debug!(to = email, code, "validation code");

        Ok(())
    }
}
