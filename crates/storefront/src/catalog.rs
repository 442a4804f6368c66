//! Product catalog.
//!
//! The catalog stands in for the menu's "add to cart" buttons: each product
//! carries its id, name, price, and comma-separated tags. Actions refer to
//! products by id, and an id the catalog does not know is an error rather
//! than a silent no-op.
//!
//! ```yaml
//! products:
//!   - id: p1
//!     name: Salada Caesar
//!     price: "12.50"
//!     tags: "gluten, dairy"
//! ```

use std::collections::HashSet;
use std::path::Path;

use marmita_core::{Price, ProductId, TagSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("product with empty id (name {0:?})")]
    EmptyId(String),

    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    #[error("product {id} has negative price {price}")]
    NegativePrice { id: ProductId, price: Price },
}

/// A product offered on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub tags: TagSet,
}

impl Product {
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price, tags: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            tags: TagSet::parse(tags),
        }
    }
}

/// The set of products that can be added to the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating every product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on empty or duplicate ids or negative prices.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.id.is_blank() {
                return Err(CatalogError::EmptyId(product.name.clone()));
            }
            if product.price.is_negative() {
                return Err(CatalogError::NegativePrice {
                    id: product.id.clone(),
                    price: product.price,
                });
            }
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse and validate a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the document is malformed or invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let raw: Self = serde_yaml::from_str(yaml)?;
        Self::new(raw.products)
    }

    /// Read and validate a YAML catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or is invalid.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml(&yaml)?;
        debug!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
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
