//! In-memory membership repository.
//!
//! The invoice write is set-once under the map's write lock, so two
//! concurrent submissions of the same record cannot both record an
//! invoice reference.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, InvoiceId, LocalDate, MembershipId,
};
use crate::domain::membership::Membership;
use crate::ports::MembershipRepository;

/// In-memory membership store.
pub struct InMemoryMembershipRepository {
    records: RwLock<HashMap<MembershipId, Membership>>,
}

impl InMemoryMembershipRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored records (for test assertions).
    pub fn len(&self) -> usize {
        self.records
            .read()
            .expect("InMemoryMembershipRepository: lock poisoned")
            .len()
    }

    /// True if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryMembershipRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut records = self
            .records
            .write()
            .expect("InMemoryMembershipRepository: lock poisoned");
        if records.contains_key(&membership.id) {
            return Err(DomainError::validation(
                "id",
                format!("Membership {} already exists", membership.id),
            ));
        }
        records.insert(membership.id, membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut records = self
            .records
            .write()
            .expect("InMemoryMembershipRepository: lock poisoned");
        if !records.contains_key(&membership.id) {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("Membership {} not found", membership.id),
            ));
        }
        records.insert(membership.id, membership.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        let records = self
            .records
            .read()
            .expect("InMemoryMembershipRepository: lock poisoned");
        Ok(records.get(id).cloned())
    }

    async fn record_invoice(
        &self,
        id: &MembershipId,
        invoice: &InvoiceId,
    ) -> Result<(), DomainError> {
        // Check and write under one lock: the set-once guard
        let mut records = self
            .records
            .write()
            .expect("InMemoryMembershipRepository: lock poisoned");
        let record = records.get_mut(id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("Membership {} not found", id),
            )
        })?;
        if record.invoice.is_some() {
            return Err(DomainError::new(
                ErrorCode::InvoiceAlreadyRecorded,
                format!("Membership {} already has an invoice recorded", id),
            ));
        }
        record.invoice = Some(invoice.clone());
        Ok(())
    }

    async fn find_active_expiring_between(
        &self,
        from: LocalDate,
        to: LocalDate,
    ) -> Result<Vec<Membership>, DomainError> {
        let records = self
            .records
            .read()
            .expect("InMemoryMembershipRepository: lock poisoned");
        Ok(records
            .values()
            .filter(|m| m.status.is_notifiable())
            .filter(|m| {
                m.end_date
                    .map(|end| end >= from && end <= to)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }
}
