//! Recording mailer for identity tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::identity::ports::{EmailMessage, Mailer, MailerError, MailerResult};

/// Mailer that records every message instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
}

impl RecordingMailer {
    /// Creates a mailer with an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every message sent so far.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Delivery`] when the outbox lock is poisoned.
    pub fn sent(&self) -> MailerResult<Vec<EmailMessage>> {
        let sent = self
            .sent
            .read()
            .map_err(|err| MailerError::delivery(std::io::Error::other(err.to_string())))?;
        Ok(sent.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> MailerResult<()> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| MailerError::delivery(std::io::Error::other(err.to_string())))?;
        sent.push(message.clone());
        Ok(())
    }
}
