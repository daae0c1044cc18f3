//! View-model state driven by the command line.

pub mod products;

pub use products::ProductList;
