//! Mailer port.
//!
//! Fire-and-forget from the core's perspective: no delivery confirmation
//! is consumed, a send either succeeds or raises.

use async_trait::async_trait;
use std::fmt;

/// One outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Error returned by the mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailError {
    pub message: String,
}

impl MailError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mail error: {}", self.message)
    }
}

impl std::error::Error for MailError {}

/// Port for outbound email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one email.
    async fn send(&self, message: EmailMessage) -> Result<(), MailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailer_is_object_safe() {
        fn _accepts_dyn(_mailer: &dyn Mailer) {}
    }
}
