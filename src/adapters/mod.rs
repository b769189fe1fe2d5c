//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory implementations of every port, used for local
//!   wiring and tests

pub mod memory;

pub use memory::{
    InMemoryBilling, InMemoryCatalog, InMemoryMemberDirectory, InMemoryMembershipRepository,
    InMemoryMembershipTypeRepository, RecordingMailer,
};
