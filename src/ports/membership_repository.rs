//! Membership repository port.
//!
//! Defines the contract for persisting and retrieving Membership records.
//! Implementations handle the actual store operations.
//!
//! # Design
//!
//! - **Set-once invoice**: `record_invoice` is the single-field write used
//!   after invoice generation. It must be atomic with respect to
//!   concurrent submissions of the same record, closing the
//!   read-then-write duplicate-invoice race a plain existence check
//!   leaves open.
//! - **Range query**: the expiry sweep needs an equality filter on status
//!   plus an inclusive date-range filter on `end_date`.

use crate::domain::foundation::{DomainError, InvoiceId, LocalDate, MembershipId};
use crate::domain::membership::Membership;
use async_trait::async_trait;

/// Repository port for Membership persistence.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Save a new membership.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the id already exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Update an existing membership.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if the membership doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Find a membership by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError>;

    /// Record the generated invoice reference without a full re-save.
    ///
    /// Set-once semantics: implementations must reject the write if an
    /// invoice is already recorded, atomically under concurrent callers.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if the membership doesn't exist
    /// - `InvoiceAlreadyRecorded` if an invoice reference is already set
    async fn record_invoice(
        &self,
        id: &MembershipId,
        invoice: &InvoiceId,
    ) -> Result<(), DomainError>;

    /// Active memberships whose `end_date` falls in the inclusive range
    /// `[from, to]`.
    ///
    /// Used by the expiry sweep. Records without an end date or with a
    /// non-Active status are never returned.
    async fn find_active_expiring_between(
        &self,
        from: LocalDate,
        to: LocalDate,
    ) -> Result<Vec<Membership>, DomainError>;
}
