//! In-memory member directory adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::MemberId;
use crate::ports::{DirectoryError, MemberContact, MemberDirectory};

/// In-memory member directory.
pub struct InMemoryMemberDirectory {
    contacts: RwLock<HashMap<MemberId, MemberContact>>,
    classifications: RwLock<HashMap<MemberId, String>>,
}

impl InMemoryMemberDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self {
            contacts: RwLock::new(HashMap::new()),
            classifications: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a member's contact details.
    pub fn register(&self, member: MemberId, email: impl Into<String>, name: impl Into<String>) {
        self.contacts
            .write()
            .expect("InMemoryMemberDirectory: lock poisoned")
            .insert(
                member,
                MemberContact {
                    email: email.into(),
                    display_name: name.into(),
                },
            );
    }

    /// Current classification of a member, if any (for test assertions).
    pub fn classification_of(&self, member: &MemberId) -> Option<String> {
        self.classifications
            .read()
            .expect("InMemoryMemberDirectory: lock poisoned")
            .get(member)
            .cloned()
    }
}

impl Default for InMemoryMemberDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn resolve_contact(&self, member: &MemberId) -> Result<MemberContact, DirectoryError> {
        self.contacts
            .read()
            .expect("InMemoryMemberDirectory: lock poisoned")
            .get(member)
            .cloned()
            .ok_or_else(|| DirectoryError::new(format!("member {} not found", member)))
    }

    async fn set_classification(
        &self,
        member: &MemberId,
        classification: &str,
    ) -> Result<(), DirectoryError> {
        self.classifications
            .write()
            .expect("InMemoryMemberDirectory: lock poisoned")
            .insert(member.clone(), classification.to_string());
        Ok(())
    }
}
