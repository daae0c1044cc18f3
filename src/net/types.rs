//! Wire types for the backend API and the client's product shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

// =============================================================================
// AUTH
// =============================================================================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful `POST /auth/login` body. `user` is kept opaque.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Value,
}

// =============================================================================
// PRODUCTS
// =============================================================================

/// A product as the client tracks it. `id == 0` marks a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
}

impl Product {
    /// Empty draft with no server id.
    #[must_use]
    pub fn draft() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.id == 0
    }
}

/// Product record as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self { id: record.id, name: record.name }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateProductRequest<'a> {
    pub name: &'a str,
}

/// `POST /products/create` body: `{product: {...}}`, or a bare record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateProductResponse {
    Wrapped { product: ProductRecord },
    Bare(ProductRecord),
}

impl CreateProductResponse {
    #[must_use]
    pub fn into_record(self) -> ProductRecord {
        match self {
            Self::Wrapped { product } | Self::Bare(product) => product,
        }
    }
}
