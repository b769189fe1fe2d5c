//! Recording mailer adapter.
//!
//! Captures every message instead of sending it, with per-recipient
//! bounce simulation for sweep failure-isolation tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::RwLock;

use crate::ports::{EmailMessage, MailError, Mailer};

/// Mailer that records sent messages.
pub struct RecordingMailer {
    sent: RwLock<Vec<EmailMessage>>,
    bouncing: RwLock<HashSet<String>>,
}

impl RecordingMailer {
    /// Creates an empty mailer.
    pub fn new() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
            bouncing: RwLock::new(HashSet::new()),
        }
    }

    /// Makes sends to this address fail.
    pub fn bounce_address(&self, address: impl Into<String>) {
        self.bouncing
            .write()
            .expect("RecordingMailer: lock poisoned")
            .insert(address.into());
    }

    /// All messages sent so far.
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent
            .read()
            .expect("RecordingMailer: lock poisoned")
            .clone()
    }
}

impl Default for RecordingMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        if self
            .bouncing
            .read()
            .expect("RecordingMailer: lock poisoned")
            .contains(&message.to)
        {
            return Err(MailError::new(format!("address {} bounced", message.to)));
        }
        self.sent
            .write()
            .expect("RecordingMailer: lock poisoned")
            .push(message);
        Ok(())
    }
}
