//! SubmitMembershipHandler - Command handler for confirming a draft
//! membership.
//!
//! Submission re-validates, flips the record to Submitted/Active, and
//! then runs the post-update actions, which is where the invoice is
//! generated.

use std::sync::Arc;

use crate::domain::foundation::{InvoiceId, MembershipId};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::{
    BillingProvider, MemberDirectory, MembershipRepository, MembershipTypeRepository,
};

use super::PostUpdateActions;

/// Command to submit a draft membership.
#[derive(Debug, Clone)]
pub struct SubmitMembershipCommand {
    pub id: MembershipId,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitMembershipResult {
    pub membership: Membership,
    /// Invoice generated by this submission, if one was created here.
    pub invoice: Option<InvoiceId>,
}

/// Handler for membership submission.
pub struct SubmitMembershipHandler {
    memberships: Arc<dyn MembershipRepository>,
    plans: Arc<dyn MembershipTypeRepository>,
    post_update: PostUpdateActions,
}

impl SubmitMembershipHandler {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        plans: Arc<dyn MembershipTypeRepository>,
        billing: Arc<dyn BillingProvider>,
        directory: Arc<dyn MemberDirectory>,
    ) -> Self {
        let post_update = PostUpdateActions::new(
            memberships.clone(),
            plans.clone(),
            billing,
            directory,
        );
        Self {
            memberships,
            plans,
            post_update,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitMembershipCommand,
    ) -> Result<SubmitMembershipResult, MembershipError> {
        let mut membership = self
            .memberships
            .find_by_id(&cmd.id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.id))?;

        let plan = self
            .plans
            .find_by_id(&membership.membership_type)
            .await?
            .ok_or_else(|| MembershipError::type_not_found(membership.membership_type))?;

        // Submission re-runs validation before the state change
        membership.validate(&plan)?;
        membership.submit()?;
        self.memberships.update(&membership).await?;

        let invoice = self.post_update.run(&mut membership).await?;

        tracing::info!(
            membership_id = %membership.id,
            member = %membership.member,
            "membership submitted"
        );

        Ok(SubmitMembershipResult { membership, invoice })
    }
}
