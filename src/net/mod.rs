//! Backend API access.
//!
//! Every product call goes through [`ApiClient`], which owns the one
//! request-augmentation pass (base URL, bearer token, 401 handling).

pub mod augmenter;
pub mod auth;
pub mod products;
pub mod types;

pub use augmenter::{ApiClient, ApiRequest};
pub use auth::AuthClient;
pub use products::ProductClient;
pub use types::{LoginResponse, Product};
