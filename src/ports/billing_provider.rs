//! Billing subsystem port.
//!
//! The billing collaborator turns a line-item request into a draft
//! invoice, which is then confirmed with a separate submit call. Both
//! calls are synchronous from the core's perspective: they succeed or
//! raise.

use crate::domain::foundation::{InvoiceId, ItemCode, LocalDate, MemberId, Money};
use async_trait::async_trait;
use std::fmt;

/// Request to create a draft invoice for one membership period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInvoiceRequest {
    /// Billed customer, the membership's member.
    pub customer: MemberId,

    /// Catalog entry for the plan being billed.
    pub item: ItemCode,

    /// Billed quantity. Memberships always bill a single period.
    pub qty: u32,

    /// Rate per unit, the plan price.
    pub rate: Money,

    /// Invoice posting date, the membership start date.
    pub posting_date: LocalDate,
}

/// A created but not yet confirmed invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftInvoice {
    /// Stable identifier usable as a reference after submission.
    pub id: InvoiceId,
}

/// Billing error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingErrorCode {
    /// The request was malformed or referenced unknown records.
    InvalidRequest,

    /// The referenced invoice does not exist.
    NotFound,

    /// The billing subsystem failed.
    ProviderError,
}

/// Error returned by the billing subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingError {
    pub code: BillingErrorCode,
    pub message: String,
}

impl BillingError {
    pub fn new(code: BillingErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for BillingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for BillingError {}

/// Port for the external billing subsystem.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Create a draft invoice from the given request.
    async fn create_draft_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<DraftInvoice, BillingError>;

    /// Confirm a previously created draft invoice.
    async fn submit_invoice(&self, id: &InvoiceId) -> Result<(), BillingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_provider_is_object_safe() {
        fn _accepts_dyn(_billing: &dyn BillingProvider) {}
    }

    #[test]
    fn billing_error_displays_code_and_message() {
        let err = BillingError::new(BillingErrorCode::ProviderError, "ledger offline");
        assert_eq!(err.to_string(), "ProviderError: ledger offline");
    }
}
