//! Mercado product client.
//!
//! ARCHITECTURE
//! ============
//! Leaf-first: `session::store` persists the token and user blob,
//! `session::service` wraps it with login/logout semantics, `guard` gates the
//! authenticated routes, and `net` issues backend calls through the single
//! request augmenter in `net::augmenter`. `state::products` is the product
//! list view-model consumed by the command line in `main.rs`.

pub mod config;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod net;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::ClientConfig;
pub use error::ClientError;
pub use navigation::{Navigator, Route};
pub use session::{FileStore, MemoryStore, SessionService, SessionStore};
