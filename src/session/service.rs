//! Login-state service over the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shared by the request augmenter (401 handling), the route guard, and the
//! login flow. Cloning is cheap; all clones see the same store and navigator.

use std::sync::Arc;

use serde_json::Value;

use super::store::SessionStore;
use crate::navigation::{Navigator, Route};

#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Record a successful login. A write the store swallowed leaves the
    /// service logged out.
    pub fn login(&self, token: &str, user: &Value) {
        self.store.write(token, user);
        if self.store.is_active() {
            tracing::info!("session stored");
        } else {
            tracing::warn!("session not persisted; still logged out");
        }
    }

    /// Clear the session and send the user to the login view.
    pub fn logout(&self) {
        self.store.clear();
        tracing::info!("session cleared");
        self.navigator.navigate(Route::Login);
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.store.is_active()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.read_token()
    }

    #[must_use]
    pub fn user(&self) -> Option<Value> {
        self.store.read_user()
    }

    pub(crate) fn navigate(&self, route: Route) {
        self.navigator.navigate(route);
    }
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
