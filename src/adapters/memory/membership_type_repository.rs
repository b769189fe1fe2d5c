//! In-memory plan repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MembershipTypeId};
use crate::domain::membership_type::MembershipType;
use crate::ports::MembershipTypeRepository;

/// In-memory plan store with a unique name constraint.
pub struct InMemoryMembershipTypeRepository {
    records: RwLock<HashMap<MembershipTypeId, MembershipType>>,
}

impl InMemoryMembershipTypeRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryMembershipTypeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipTypeRepository for InMemoryMembershipTypeRepository {
    async fn save(&self, plan: &MembershipType) -> Result<(), DomainError> {
        let mut records = self
            .records
            .write()
            .expect("InMemoryMembershipTypeRepository: lock poisoned");
        if records.values().any(|p| p.name == plan.name) {
            return Err(DomainError::validation(
                "name",
                format!("Plan '{}' already exists", plan.name),
            ));
        }
        records.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn update(&self, plan: &MembershipType) -> Result<(), DomainError> {
        let mut records = self
            .records
            .write()
            .expect("InMemoryMembershipTypeRepository: lock poisoned");
        if !records.contains_key(&plan.id) {
            return Err(DomainError::new(
                ErrorCode::MembershipTypeNotFound,
                format!("Membership type {} not found", plan.id),
            ));
        }
        records.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &MembershipTypeId,
    ) -> Result<Option<MembershipType>, DomainError> {
        let records = self
            .records
            .read()
            .expect("InMemoryMembershipTypeRepository: lock poisoned");
        Ok(records.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<MembershipType>, DomainError> {
        let records = self
            .records
            .read()
            .expect("InMemoryMembershipTypeRepository: lock poisoned");
        Ok(records.values().find(|p| p.name == name).cloned())
    }
}
