//! In-memory catalog adapter.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::domain::foundation::ItemCode;
use crate::domain::membership_type::CatalogItemSpec;
use crate::ports::{CatalogError, CatalogProvider};

/// In-memory catalog subsystem.
///
/// Uses the requested code as the stable identifier, which matches how
/// item codes behave in the real catalog.
pub struct InMemoryCatalog {
    created: RwLock<Vec<CatalogItemSpec>>,
    fail: AtomicBool,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            created: RwLock::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail (simulated outage).
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// All item specs created so far.
    pub fn created_items(&self) -> Vec<CatalogItemSpec> {
        self.created
            .read()
            .expect("InMemoryCatalog: lock poisoned")
            .clone()
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn create_item(&self, spec: CatalogItemSpec) -> Result<ItemCode, CatalogError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CatalogError::new("catalog unavailable"));
        }
        let mut created = self
            .created
            .write()
            .expect("InMemoryCatalog: lock poisoned");
        if created.iter().any(|existing| existing.code == spec.code) {
            return Err(CatalogError::new(format!(
                "item '{}' already exists",
                spec.code
            )));
        }
        let code = ItemCode::new(spec.code.clone()).map_err(|e| CatalogError::new(e.to_string()))?;
        created.push(spec);
        Ok(code)
    }
}
