// --- File: crates/storefront_catalog/src/lib.rs ---
pub mod client;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod search;

pub use client::ProductApi;
pub use error::CatalogError;
pub use models::{format_price, map_product, ApiProduct, Product, ProductPage};
pub use search::SearchCoordinator;
