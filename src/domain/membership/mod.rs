//! Membership domain module.
//!
//! Handles the subscription lifecycle of a single member: date validation,
//! derived expiry, submission state, and the invoice link.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership aggregate entity
//! - `status` - MembershipStatus and DocState state machines
//! - `errors` - Membership-specific error types

mod aggregate;
mod errors;
mod status;

pub use aggregate::Membership;
pub use errors::MembershipError;
pub use status::{DocState, MembershipStatus};
