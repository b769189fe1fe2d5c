//! In-memory adapters.
//!
//! Deterministic, lock-based implementations of every port. Used by the
//! binary wiring and by tests; none of these is a storage product.
//!
//! # Panics
//!
//! Methods may panic if internal locks are poisoned. That is acceptable
//! for local wiring and test code.

mod billing;
mod catalog;
mod mailer;
mod member_directory;
mod membership_repository;
mod membership_type_repository;

pub use billing::InMemoryBilling;
pub use catalog::InMemoryCatalog;
pub use mailer::RecordingMailer;
pub use member_directory::InMemoryMemberDirectory;
pub use membership_repository::InMemoryMembershipRepository;
pub use membership_type_repository::InMemoryMembershipTypeRepository;
