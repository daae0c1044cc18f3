//! Session persistence and login-state semantics.

pub mod service;
pub mod store;

pub use service::SessionService;
pub use store::{FileStore, MemoryStore, SessionStore, TOKEN_KEY, USER_KEY};
