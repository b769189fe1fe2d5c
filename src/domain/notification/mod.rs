//! Notification domain module.
//!
//! Reminder message content, kept as data rather than control flow.

mod templates;

pub use templates::{expiry_reminder, EmailContent, EXPIRY_REMINDER_SUBJECT};
