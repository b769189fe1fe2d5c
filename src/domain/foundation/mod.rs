//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Gymdesk domain.

mod date;
mod errors;
mod ids;
mod money;
mod state_machine;
mod timestamp;

pub use date::LocalDate;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{InvoiceId, ItemCode, MemberId, MembershipId, MembershipTypeId};
pub use money::Money;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
