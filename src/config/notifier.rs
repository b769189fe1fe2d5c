//! Expiry notifier configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Expiry sweep configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Reminder window in days ahead of today, inclusive
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Seconds between sweeps
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl NotifierConfig {
    /// Sweep interval as a Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate notifier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_days == 0 || self.window_days > 365 {
            return Err(ValidationError::InvalidNotifierWindow);
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_window_days() -> u32 {
    7
}

// One sweep per day
fn default_sweep_interval_secs() -> u64 {
    24 * 60 * 60
}
