//! Product catalog seam.
//!
//! The catalog is backend-hosted and reached over the network; lookups have
//! nondeterministic latency and can fail. The cart only uses it to re-check
//! authoritative stock during quantity edits, and treats lookup failure the
//! same as "no stock constraint."

use async_trait::async_trait;
use thiserror::Error;

use tech_nexus_core::{ProductId, ProductRecord};

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The network round-trip failed.
    #[error("Catalog request failed: {0}")]
    Request(String),

    /// The backend returned a response that could not be decoded.
    #[error("Catalog response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read access to the product catalog.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch a single product by ID.
    ///
    /// Returns `Ok(None)` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or the response is
    /// malformed.
    async fn fetch_product_by_id(&self, id: &ProductId)
    -> Result<Option<ProductRecord>, CatalogError>;
}

/// In-memory [`ProductCatalog`] used by tests and demos.
///
/// Holds a fixed set of product records; `set_stock` simulates the backend
/// stock figure changing between lookups.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: std::sync::Mutex<Vec<ProductRecord>>,
}

impl MemoryCatalog {
    /// Create a catalog holding the given records.
    #[must_use]
    pub fn new(products: Vec<ProductRecord>) -> Self {
        Self {
            products: std::sync::Mutex::new(products),
        }
    }

    /// Overwrite the stock figure of a product, if present.
    pub fn set_stock(&self, id: &ProductId, stock: u32) {
        let mut products = self
            .products
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(product) = products.iter_mut().find(|p| &p.id == id) {
            product.stock = Some(stock);
        }
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
    async fn fetch_product_by_id(
        &self,
        id: &ProductId,
    ) -> Result<Option<ProductRecord>, CatalogError> {
        let products = self
            .products
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(products.iter().find(|p| &p.id == id).cloned())
    }
}

/// A catalog whose every lookup fails, for exercising degraded paths.
#[derive(Debug, Default)]
pub struct UnreachableCatalog;

#[async_trait]
impl ProductCatalog for UnreachableCatalog {
    async fn fetch_product_by_id(
        &self,
        _id: &ProductId,
    ) -> Result<Option<ProductRecord>, CatalogError> {
        Err(CatalogError::Request("catalog unreachable".to_owned()))
    }
}
