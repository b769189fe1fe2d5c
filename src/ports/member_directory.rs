//! Member directory port.
//!
//! Resolves member identifiers to contact details and carries the
//! classification field the membership lifecycle stamps on members.

use crate::domain::foundation::MemberId;
use async_trait::async_trait;
use std::fmt;

/// Contact details for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberContact {
    pub email: String,
    pub display_name: String,
}

/// Error returned by the member directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryError {
    pub message: String,
}

impl DirectoryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "directory error: {}", self.message)
    }
}

impl std::error::Error for DirectoryError {}

/// Port for the external member directory.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Resolve a member to their contact email and display name.
    async fn resolve_contact(&self, member: &MemberId) -> Result<MemberContact, DirectoryError>;

    /// Set the member's classification tag by identifier.
    ///
    /// Idempotent: setting the same classification twice is a no-op in
    /// effect.
    async fn set_classification(
        &self,
        member: &MemberId,
        classification: &str,
    ) -> Result<(), DirectoryError>;
}
