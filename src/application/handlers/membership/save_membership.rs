//! SaveMembershipHandler - Command handler for creating or re-saving a
//! membership record.
//!
//! One save is one validation pass plus the post-save side effects, in
//! the fixed order: date validation, expiry computation, persistence,
//! invoice generation (submitted records only), classification sync.

use std::sync::Arc;

use crate::domain::foundation::{LocalDate, MemberId, MembershipId, MembershipTypeId};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::{
    BillingProvider, MemberDirectory, MembershipRepository, MembershipTypeRepository,
};

use super::PostUpdateActions;

/// Command to create a new membership or re-save an existing one.
#[derive(Debug, Clone)]
pub struct SaveMembershipCommand {
    /// Existing record to re-save; `None` creates a new draft.
    pub id: Option<MembershipId>,
    pub member: MemberId,
    pub membership_type: MembershipTypeId,
    pub start_date: LocalDate,
}

/// Result of a successful save.
#[derive(Debug, Clone)]
pub struct SaveMembershipResult {
    pub membership: Membership,
}

/// Handler for membership saves.
pub struct SaveMembershipHandler {
    memberships: Arc<dyn MembershipRepository>,
    plans: Arc<dyn MembershipTypeRepository>,
    post_update: PostUpdateActions,
}

impl SaveMembershipHandler {
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
        cmd: SaveMembershipCommand,
    ) -> Result<SaveMembershipResult, MembershipError> {
        // 1. The plan is required for expiry computation
        let plan = self
            .plans
            .find_by_id(&cmd.membership_type)
            .await?
            .ok_or_else(|| MembershipError::type_not_found(cmd.membership_type))?;

        // 2. Load or create the record
        let (mut membership, is_new) = match cmd.id {
            Some(id) => {
                let mut existing = self
                    .memberships
                    .find_by_id(&id)
                    .await?
                    .ok_or_else(|| MembershipError::not_found(id))?;
                existing.member = cmd.member;
                existing.membership_type = cmd.membership_type;
                existing.start_date = cmd.start_date;
                (existing, false)
            }
            None => (
                Membership::new(
                    MembershipId::new(),
                    cmd.member,
                    cmd.membership_type,
                    cmd.start_date,
                ),
                true,
            ),
        };

        // 3. Validation aborts the whole save; nothing is persisted on error
        membership.validate(&plan)?;

        // 4. Persist
        if is_new {
            self.memberships.save(&membership).await?;
        } else {
            self.memberships.update(&membership).await?;
        }

        // 5. Post-save side effects run on every save, not only creation
        self.post_update.run(&mut membership).await?;

        Ok(SaveMembershipResult { membership })
    }
}
