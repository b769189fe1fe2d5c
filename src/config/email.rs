//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Outbound email configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.from_email.is_empty() {
            return Err(ValidationError::MissingRequired("FROM_EMAIL"));
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_from_email() -> String {
    "noreply@gymdesk.example".to_string()
}

fn default_from_name() -> String {
    "Gym Desk".to_string()
}
