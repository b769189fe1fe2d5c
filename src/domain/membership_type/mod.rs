//! MembershipType domain module.
//!
//! A membership type is a plan definition: a duration in whole months,
//! a price, and a lazily materialized catalog item used for invoicing.

mod aggregate;

pub use aggregate::{CatalogItemSpec, MembershipType, SERVICES_ITEM_GROUP};
