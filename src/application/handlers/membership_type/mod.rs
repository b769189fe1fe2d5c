//! Membership plan command handlers.

mod save_membership_type;

pub use save_membership_type::{
    SaveMembershipTypeCommand, SaveMembershipTypeHandler, SaveMembershipTypeResult,
};
