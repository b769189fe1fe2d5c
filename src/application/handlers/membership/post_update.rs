//! Post-save side effects for membership records.
//!
//! Runs after every successful save, not only on first creation:
//!
//! 1. `ensure_invoice` - fires only when the record is submitted and no
//!    invoice reference exists yet
//! 2. `sync_member_classification` - unconditionally stamps the linked
//!    member with the "Gym Member" marker (idempotent at the directory)

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, InvoiceId};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::{
    BillingProvider, CreateInvoiceRequest, MemberDirectory, MembershipRepository,
    MembershipTypeRepository,
};

/// Classification tag stamped on every member with a membership record.
pub const GYM_MEMBER_CLASSIFICATION: &str = "Gym Member";

/// Side effects shared by the save and submit handlers.
pub struct PostUpdateActions {
    memberships: Arc<dyn MembershipRepository>,
    plans: Arc<dyn MembershipTypeRepository>,
    billing: Arc<dyn BillingProvider>,
    directory: Arc<dyn MemberDirectory>,
}

impl PostUpdateActions {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        plans: Arc<dyn MembershipTypeRepository>,
        billing: Arc<dyn BillingProvider>,
        directory: Arc<dyn MemberDirectory>,
    ) -> Self {
        Self {
            memberships,
            plans,
            billing,
            directory,
        }
    }

    /// Run all post-save actions in order: invoice first, then
    /// classification sync. Returns the invoice generated by this call,
    /// if any.
    pub async fn run(
        &self,
        membership: &mut Membership,
    ) -> Result<Option<InvoiceId>, MembershipError> {
        let invoice = self.ensure_invoice(membership).await?;
        self.sync_member_classification(membership).await?;
        Ok(invoice)
    }

    /// Generate and link the invoice for a submitted record.
    ///
    /// No-op unless `doc_state == Submitted` and no invoice is recorded.
    /// The repository's set-once write is the duplicate guard: if a
    /// concurrent submission records first, the lost race is logged and
    /// the existing reference is left untouched.
    pub async fn ensure_invoice(
        &self,
        membership: &mut Membership,
    ) -> Result<Option<InvoiceId>, MembershipError> {
        if !membership.needs_invoice() {
            return Ok(None);
        }

        let plan = self
            .plans
            .find_by_id(&membership.membership_type)
            .await?
            .ok_or_else(|| MembershipError::type_not_found(membership.membership_type))?;

        let item = plan
            .item
            .clone()
            .ok_or_else(|| MembershipError::missing_reference("membership_type.item"))?;

        let draft = self
            .billing
            .create_draft_invoice(CreateInvoiceRequest {
                customer: membership.member.clone(),
                item,
                qty: 1,
                rate: plan.price,
                posting_date: membership.start_date,
            })
            .await
            .map_err(|e| MembershipError::billing_failed(e.message))?;

        self.billing
            .submit_invoice(&draft.id)
            .await
            .map_err(|e| MembershipError::billing_failed(e.message))?;

        match self.memberships.record_invoice(&membership.id, &draft.id).await {
            Ok(()) => {
                membership.record_invoice(draft.id.clone())?;
                tracing::info!(
                    membership_id = %membership.id,
                    invoice_id = %draft.id,
                    "invoice generated for membership"
                );
                Ok(Some(draft.id))
            }
            Err(e) if e.code == ErrorCode::InvoiceAlreadyRecorded => {
                // A concurrent submission won the set-once write. The
                // invoice created here is orphaned at the billing side.
                tracing::warn!(
                    membership_id = %membership.id,
                    orphaned_invoice = %draft.id,
                    "invoice already recorded by a concurrent submission"
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Stamp the linked member with the gym classification.
    pub async fn sync_member_classification(
        &self,
        membership: &Membership,
    ) -> Result<(), MembershipError> {
        self.directory
            .set_classification(&membership.member, GYM_MEMBER_CLASSIFICATION)
            .await
            .map_err(|e| MembershipError::directory_failed(e.message))
    }
}
