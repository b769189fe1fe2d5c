//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `MembershipRepository` - Membership record store
//! - `MembershipTypeRepository` - Plan record store
//!
//! ## Collaborator Ports
//!
//! - `BillingProvider` - Billing subsystem (draft + submit invoices)
//! - `CatalogProvider` - Catalog subsystem (billable item creation)
//! - `MemberDirectory` - Member contact lookup and classification
//! - `Mailer` - Outbound reminder email, fire-and-forget

mod billing_provider;
mod catalog_provider;
mod mailer;
mod member_directory;
mod membership_repository;
mod membership_type_repository;

pub use billing_provider::{BillingError, BillingErrorCode, BillingProvider, CreateInvoiceRequest, DraftInvoice};
pub use catalog_provider::{CatalogError, CatalogProvider};
pub use mailer::{EmailMessage, MailError, Mailer};
pub use member_directory::{DirectoryError, MemberContact, MemberDirectory};
pub use membership_repository::MembershipRepository;
pub use membership_type_repository::MembershipTypeRepository;
