//! MembershipType repository port.

use crate::domain::foundation::{DomainError, MembershipTypeId};
use crate::domain::membership_type::MembershipType;
use async_trait::async_trait;

/// Repository port for plan definitions.
///
/// Implementations must enforce the unique `name` constraint.
#[async_trait]
pub trait MembershipTypeRepository: Send + Sync {
    /// Save a new plan.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a plan with the same name already exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, plan: &MembershipType) -> Result<(), DomainError>;

    /// Update an existing plan.
    ///
    /// # Errors
    ///
    /// - `MembershipTypeNotFound` if the plan doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, plan: &MembershipType) -> Result<(), DomainError>;

    /// Find a plan by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(
        &self,
        id: &MembershipTypeId,
    ) -> Result<Option<MembershipType>, DomainError>;

    /// Find a plan by its unique name.
    ///
    /// Returns `None` if no plan carries the name.
    async fn find_by_name(&self, name: &str) -> Result<Option<MembershipType>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_type_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MembershipTypeRepository) {}
    }
}
