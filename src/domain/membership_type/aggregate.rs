//! MembershipType aggregate entity.
//!
//! # Design Decisions
//!
//! - **Money in cents**: price stored as integer cents (never floats)
//! - **Set-once item**: the linked catalog entry is materialized lazily on
//!   validation and never overwritten, so each plan maps to exactly one
//!   billable item for the lifetime of the record

use crate::domain::foundation::{
    ItemCode, LocalDate, MembershipTypeId, Money, Timestamp, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Catalog group all plan items are filed under.
pub const SERVICES_ITEM_GROUP: &str = "Services";

/// Descriptor handed to the catalog subsystem when materializing the
/// plan's billable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItemSpec {
    pub code: String,
    pub display_name: String,
    pub item_group: String,
    pub is_stock_item: bool,
    pub is_sales_item: bool,
    pub include_in_manufacturing: bool,
}

/// MembershipType aggregate - a subscription plan definition.
///
/// # Invariants
///
/// - `name` is unique across plans (enforced by the repository)
/// - `duration_months >= 1`
/// - `item` is either absent or points at a previously created catalog
///   entry; once populated it is never overwritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipType {
    /// Unique identifier for this plan.
    pub id: MembershipTypeId,

    /// Plan label, unique across plans.
    pub name: String,

    /// Subscription length in whole calendar months.
    pub duration_months: u32,

    /// Price charged per subscription period.
    pub price: Money,

    /// Linked catalog entry, set exactly once on first validation.
    pub item: Option<ItemCode>,

    /// When the plan was created.
    pub created_at: Timestamp,

    /// When the plan was last updated.
    pub updated_at: Timestamp,
}

impl MembershipType {
    /// Create a new plan definition.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `name` is empty or `duration_months`
    /// is zero.
    pub fn new(
        id: MembershipTypeId,
        name: impl Into<String>,
        duration_months: u32,
        price: Money,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if duration_months == 0 {
            return Err(ValidationError::out_of_range("duration_months", 1, 1200, 0));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            duration_months,
            price,
            item: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// True if the plan still needs its catalog item materialized.
    pub fn needs_item(&self) -> bool {
        self.item.is_none()
    }

    /// Descriptor for the catalog entry this plan materializes.
    ///
    /// Code is `GYM-{name}`, display name `Gym Membership - {name}`, filed
    /// under the Services group as a non-stock, sales-enabled item.
    pub fn catalog_item_spec(&self) -> CatalogItemSpec {
        CatalogItemSpec {
            code: format!("GYM-{}", self.name),
            display_name: format!("Gym Membership - {}", self.name),
            item_group: SERVICES_ITEM_GROUP.to_string(),
            is_stock_item: false,
            is_sales_item: true,
            include_in_manufacturing: false,
        }
    }

    /// Attach the materialized catalog entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error if an item is already attached; the link
    /// is set exactly once.
    pub fn attach_item(&mut self, item: ItemCode) -> Result<(), ValidationError> {
        if self.item.is_some() {
            return Err(ValidationError::invalid_format(
                "item",
                "catalog item is already attached and cannot be overwritten",
            ));
        }
        self.item = Some(item);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Expiry date for a subscription starting on `start`.
    ///
    /// Calendar-month arithmetic; day-of-month clamps to the last valid
    /// day of the target month.
    pub fn expiry_from(&self, start: LocalDate) -> LocalDate {
        start.add_months(self.duration_months)
    }
}
