//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `GYMDESK_` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use gymdesk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod email;
mod error;
mod notifier;

pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use notifier::NotifierConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Outbound email configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Expiry sweep configuration
    #[serde(default)]
    pub notifier: NotifierConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GYMDESK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GYMDESK__NOTIFIER__WINDOW_DAYS=14` -> `notifier.window_days = 14`
    /// - `GYMDESK__EMAIL__FROM_EMAIL=...` -> `email.from_email = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GYMDESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.email.validate()?;
        self.notifier.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("GYMDESK__NOTIFIER__WINDOW_DAYS");
        env::remove_var("GYMDESK__EMAIL__FROM_EMAIL");
    }

    #[test]
    fn test_load_with_all_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.notifier.window_days, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_window_days() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("GYMDESK__NOTIFIER__WINDOW_DAYS", "14");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.notifier.window_days, 14);
    }

    #[test]
    fn test_custom_from_email() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("GYMDESK__EMAIL__FROM_EMAIL", "desk@gym.example");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.email.from_email, "desk@gym.example");
    }
}
