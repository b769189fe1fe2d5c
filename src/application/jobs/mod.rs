//! Background jobs.

mod expiry_notifier;

pub use expiry_notifier::{ExpiryNotifier, ExpiryNotifierConfig, SweepReport};
