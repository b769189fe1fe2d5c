//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod membership;
pub mod membership_type;

pub use membership::{
    SaveMembershipCommand, SaveMembershipHandler, SaveMembershipResult,
    SubmitMembershipCommand, SubmitMembershipHandler, SubmitMembershipResult,
    GYM_MEMBER_CLASSIFICATION,
};
pub use membership_type::{
    SaveMembershipTypeCommand, SaveMembershipTypeHandler, SaveMembershipTypeResult,
};
