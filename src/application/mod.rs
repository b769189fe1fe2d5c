//! Application layer - commands, handlers, and background jobs.
//!
//! This layer orchestrates domain operations and coordinates between
//! ports. Lifecycle hooks are explicit handler calls, never framework
//! reflection: a caller invokes save, submit, or a sweep deliberately.

pub mod handlers;
pub mod jobs;

pub use handlers::{
    SaveMembershipCommand, SaveMembershipHandler, SaveMembershipResult,
    SaveMembershipTypeCommand, SaveMembershipTypeHandler, SaveMembershipTypeResult,
    SubmitMembershipCommand, SubmitMembershipHandler, SubmitMembershipResult,
    GYM_MEMBER_CLASSIFICATION,
};
pub use jobs::{ExpiryNotifier, ExpiryNotifierConfig, SweepReport};
