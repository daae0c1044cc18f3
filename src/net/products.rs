//! Product CRUD calls.

use reqwest::Method;

use super::augmenter::{ApiClient, ApiRequest};
use super::types::{CreateProductRequest, CreateProductResponse, Product, ProductRecord};
use crate::error::ClientError;

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

pub const PRODUCTS_PATH: &str = "/products";

fn list_endpoint() -> String {
    format!("{PRODUCTS_PATH}/all")
}

fn create_endpoint() -> String {
    format!("{PRODUCTS_PATH}/create")
}

fn delete_endpoint(id: u64) -> String {
    format!("{PRODUCTS_PATH}/delete/{id}")
}

#[derive(Clone, Debug)]
pub struct ProductClient {
    api: ApiClient,
}

impl ProductClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch every product, keeping only `id` and `name`.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the request augmenter or body decoding.
    pub async fn list_all(&self) -> Result<Vec<Product>, ClientError> {
        let records: Vec<ProductRecord> = self.api.send_json(ApiRequest::new(Method::GET, list_endpoint())).await?;
        Ok(records.into_iter().map(Product::from).collect())
    }

    /// Create a product named `name` (trimmed).
    ///
    /// Returns `Ok(None)` without contacting the backend when the trimmed
    /// name is empty.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the request augmenter or body decoding.
    pub async fn create(&self, name: &str) -> Result<Option<Product>, ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let body = serde_json::to_value(CreateProductRequest { name })?;
        let request = ApiRequest::new(Method::POST, create_endpoint()).json(body);
        let created: CreateProductResponse = self.api.send_json(request).await?;
        let product = Product::from(created.into_record());
        tracing::info!(id = product.id, name = %product.name, "product created");
        Ok(Some(product))
    }

    /// Delete product `id`. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the request augmenter.
    pub async fn delete(&self, id: u64) -> Result<(), ClientError> {
        self.api.send(ApiRequest::new(Method::DELETE, delete_endpoint(id))).await?;
        tracing::info!(id, "product deleted");
        Ok(())
    }
}
