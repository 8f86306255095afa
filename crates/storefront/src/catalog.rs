//! Read-only product catalog.
//!
//! The cart never mutates the catalog; it only joins against it by ID to
//! resolve names, images and unit prices for display.

use std::collections::HashSet;
use std::path::Path;

use shopping_cart_core::{Product, ProductId};
use thiserror::Error;

/// Catalog bundled with the crate, used when no catalog path is configured.
const BUILTIN_CATALOG: &str = include_str!("../data/items.json");

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog JSON is malformed.
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries share an ID, so joins would be ambiguous.
    #[error("Duplicate product ID in catalog: {0}")]
    DuplicateId(ProductId),
}

/// Ordered, read-only list of products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products, rejecting duplicate IDs.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an ID.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(CatalogError::DuplicateId(dup.id));
        }
        Ok(Self { products })
    }

    /// Parse a JSON array of `{id, name, price, imageUrl}` objects.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed or IDs repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` only if the bundled file is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
