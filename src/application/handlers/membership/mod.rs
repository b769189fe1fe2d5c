//! Membership command handlers.
//!
//! - `save_membership` - create or re-save a record (validate + on_update)
//! - `submit_membership` - confirm a draft (on_submit)
//! - `post_update` - side effects shared by both: invoice generation and
//!   member classification sync

mod post_update;
mod save_membership;
mod submit_membership;

pub use post_update::{PostUpdateActions, GYM_MEMBER_CLASSIFICATION};
pub use save_membership::{SaveMembershipCommand, SaveMembershipHandler, SaveMembershipResult};
pub use submit_membership::{
    SubmitMembershipCommand, SubmitMembershipHandler, SubmitMembershipResult,
};
