//! In-memory billing adapter.
//!
//! Issues sequential invoice identifiers and records every request for
//! test assertions. A failure toggle simulates a billing outage.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use crate::domain::foundation::InvoiceId;
use crate::ports::{
    BillingError, BillingErrorCode, BillingProvider, CreateInvoiceRequest, DraftInvoice,
};

/// In-memory billing subsystem.
pub struct InMemoryBilling {
    next_number: AtomicU64,
    created: RwLock<Vec<CreateInvoiceRequest>>,
    submitted: RwLock<Vec<InvoiceId>>,
    fail: AtomicBool,
}

impl InMemoryBilling {
    /// Creates a billing adapter issuing SINV-0001, SINV-0002, ...
    pub fn new() -> Self {
        Self {
            next_number: AtomicU64::new(1),
            created: RwLock::new(Vec::new()),
            submitted: RwLock::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail (simulated outage).
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// All invoice creation requests seen so far.
    pub fn created_requests(&self) -> Vec<CreateInvoiceRequest> {
        self.created
            .read()
            .expect("InMemoryBilling: lock poisoned")
            .clone()
    }

    /// All submitted invoice ids so far.
    pub fn submitted_invoices(&self) -> Vec<InvoiceId> {
        self.submitted
            .read()
            .expect("InMemoryBilling: lock poisoned")
            .clone()
    }
}

impl Default for InMemoryBilling {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillingProvider for InMemoryBilling {
    async fn create_draft_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<DraftInvoice, BillingError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BillingError::new(
                BillingErrorCode::ProviderError,
                "billing unavailable",
            ));
        }
        let number = self.next_number.fetch_add(1, Ordering::SeqCst);
        let id = InvoiceId::new(format!("SINV-{:04}", number))
            .map_err(|e| BillingError::new(BillingErrorCode::ProviderError, e.to_string()))?;
        self.created
            .write()
            .expect("InMemoryBilling: lock poisoned")
            .push(request);
        Ok(DraftInvoice { id })
    }

    async fn submit_invoice(&self, id: &InvoiceId) -> Result<(), BillingError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BillingError::new(
                BillingErrorCode::ProviderError,
                "billing unavailable",
            ));
        }
        self.submitted
            .write()
            .expect("InMemoryBilling: lock poisoned")
            .push(id.clone());
        Ok(())
    }
}
