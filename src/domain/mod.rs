//! Domain layer - entities, value objects, and domain rules.
//!
//! Pure business logic with no knowledge of persistence, billing, or
//! transport. External collaborators enter only through `crate::ports`.

pub mod foundation;
pub mod membership;
pub mod membership_type;
pub mod notification;
