//! Product-list state for the product view.
//!
//! DESIGN
//! ======
//! The local list only changes after the backend confirms: a created product
//! is appended once its server id is known, and a removed one is dropped only
//! after the delete succeeds. A failed call leaves list and draft untouched.

use crate::error::ClientError;
use crate::net::{Product, ProductClient};

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductList {
    pub products: Vec<Product>,
    /// Product being typed into the "add" field; always a draft.
    pub draft: Product,
}

impl ProductList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the local list with the backend's.
    ///
    /// # Errors
    ///
    /// Returns the client error; the list is unchanged.
    pub async fn load(&mut self, client: &ProductClient) -> Result<(), ClientError> {
        self.products = client.list_all().await?;
        Ok(())
    }

    /// Best-effort [`ProductList::load`]: a failure is logged and the list is
    /// left as it was. Returns whether the list was refreshed.
    pub async fn refresh(&mut self, client: &ProductClient) -> bool {
        match self.load(client).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, code = e.error_code(), "product list refresh failed");
                false
            }
        }
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    /// Create the draft. Returns the appended product, or `None` when the
    /// draft name was blank and nothing was sent.
    ///
    /// # Errors
    ///
    /// Returns the client error; list and draft are unchanged.
    pub async fn add(&mut self, client: &ProductClient) -> Result<Option<&Product>, ClientError> {
        let Some(created) = client.create(&self.draft.name).await? else {
            return Ok(None);
        };
        self.products.push(created);
        self.draft = Product::draft();
        Ok(self.products.last())
    }

    /// Delete product `id` after `confirm` approves it.
    ///
    /// Returns `false` if the user declined (no request is made). Unknown ids
    /// are still confirmed by id and sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns the client error; the list is unchanged.
    pub async fn remove<F>(&mut self, client: &ProductClient, id: u64, confirm: F) -> Result<bool, ClientError>
    where
        F: FnOnce(u64, Option<&Product>) -> bool,
    {
        if !confirm(id, self.find(id)) {
            return Ok(false);
        }
        client.delete(id).await?;
        self.products.retain(|p| p.id != id);
        Ok(true)
    }

    #[must_use]
    pub fn find(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}
