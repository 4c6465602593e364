//! Port for the email collaborator.

use crate::identity::domain::EmailAddress;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mailer operations.
pub type MailerResult<T> = Result<T, MailerError>;

/// A rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    recipients: Vec<EmailAddress>,
    subject: String,
    body: String,
}

impl EmailMessage {
    /// Creates a message for the given recipients.
    #[must_use]
    pub fn new(
        recipients: impl IntoIterator<Item = EmailAddress>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipients: recipients.into_iter().collect(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Returns the recipient addresses.
    #[must_use]
    pub fn recipients(&self) -> &[EmailAddress] {
        &self.recipients
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the message body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Email delivery contract.
///
/// Delivery is fire-and-forget from this crate's perspective: a failure is
/// reported to the caller of the current request but never retried here.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Delivery`] when the underlying transport
    /// rejects the message.
    async fn send(&self, message: &EmailMessage) -> MailerResult<()>;
}

/// Errors returned by mailer implementations.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    /// The transport failed to accept the message.
    #[error("email delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailerError {
    /// Wraps a transport failure.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
