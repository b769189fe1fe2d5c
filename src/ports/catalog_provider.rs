//! Catalog subsystem port.

use crate::domain::foundation::ItemCode;
use crate::domain::membership_type::CatalogItemSpec;
use async_trait::async_trait;
use std::fmt;

/// Error returned by the catalog subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogError {
    pub message: String,
}

impl CatalogError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "catalog error: {}", self.message)
    }
}

impl std::error::Error for CatalogError {}

/// Port for the external catalog subsystem.
///
/// Given an item descriptor, returns the stable code of the created
/// entry. Uniqueness of codes is the catalog's concern; the core calls
/// this at most once per plan.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Create a catalog entry and return its stable code.
    async fn create_item(&self, spec: CatalogItemSpec) -> Result<ItemCode, CatalogError>;
}
