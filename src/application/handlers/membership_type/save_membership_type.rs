//! SaveMembershipTypeHandler - Command handler for creating or updating
//! a membership plan.
//!
//! Saving a plan lazily materializes its billable catalog item: the
//! first save creates `GYM-{name}` in the catalog and pins the code on
//! the plan; later saves see the link and skip the catalog entirely.

use std::sync::Arc;

use crate::domain::foundation::{MembershipTypeId, Money};
use crate::domain::membership::MembershipError;
use crate::domain::membership_type::MembershipType;
use crate::ports::{CatalogProvider, MembershipTypeRepository};

/// Command to create a new plan or re-save an existing one.
#[derive(Debug, Clone)]
pub struct SaveMembershipTypeCommand {
    /// Existing plan to re-save; `None` creates a new one.
    pub id: Option<MembershipTypeId>,
    pub name: String,
    pub duration_months: u32,
    pub price: Money,
}

/// Result of a successful plan save.
#[derive(Debug, Clone)]
pub struct SaveMembershipTypeResult {
    pub membership_type: MembershipType,
}

/// Handler for plan saves.
pub struct SaveMembershipTypeHandler {
    plans: Arc<dyn MembershipTypeRepository>,
    catalog: Arc<dyn CatalogProvider>,
}

impl SaveMembershipTypeHandler {
    pub fn new(
        plans: Arc<dyn MembershipTypeRepository>,
        catalog: Arc<dyn CatalogProvider>,
    ) -> Self {
        Self { plans, catalog }
    }

    pub async fn handle(
        &self,
        cmd: SaveMembershipTypeCommand,
    ) -> Result<SaveMembershipTypeResult, MembershipError> {
        let (mut plan, is_new) = match cmd.id {
            Some(id) => {
                let mut existing = self
                    .plans
                    .find_by_id(&id)
                    .await?
                    .ok_or_else(|| MembershipError::type_not_found(id))?;
                if cmd.name.trim().is_empty() {
                    return Err(MembershipError::validation("name", "cannot be empty"));
                }
                // Renames are allowed; the item link is pinned to the code
                // materialized from the original name.
                existing.name = cmd.name;
                if cmd.duration_months == 0 {
                    return Err(MembershipError::validation(
                        "duration_months",
                        "must be at least 1",
                    ));
                }
                existing.duration_months = cmd.duration_months;
                existing.price = cmd.price;
                (existing, false)
            }
            None => {
                let plan = MembershipType::new(
                    MembershipTypeId::new(),
                    cmd.name,
                    cmd.duration_months,
                    cmd.price,
                )?;
                (plan, true)
            }
        };

        if plan.needs_item() {
            let code = self
                .catalog
                .create_item(plan.catalog_item_spec())
                .await
                .map_err(|e| MembershipError::catalog_failed(e.message))?;
            tracing::info!(
                membership_type = %plan.id,
                item = %code,
                "catalog item materialized for plan"
            );
            plan.attach_item(code)?;
        }

        if is_new {
            self.plans.save(&plan).await?;
        } else {
            self.plans.update(&plan).await?;
        }

        Ok(SaveMembershipTypeResult { membership_type: plan })
    }
}
