// --- File: crates/storefront_cart/src/lib.rs ---
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;

pub use error::CartError;
pub use logic::{reduce, CartAction, CartItem, CartState};
