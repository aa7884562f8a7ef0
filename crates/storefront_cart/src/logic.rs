// --- File: crates/storefront_cart/src/logic.rs ---
//! Cart state and its reducer. `reduce` is pure: it never touches I/O and
//! always returns a new state.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub const MAX_QUANTITY: u32 = 999;

/// Upper bound for a unit price (1 000 000.00 in the cart currency).
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CartItem {
    #[cfg_attr(feature = "openapi", schema(example = "17"))]
    pub product_id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Café de Chiapas 500g"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = 1250))]
    pub unit_price_cents: i64,
    #[cfg_attr(feature = "openapi", schema(example = 2))]
    pub quantity: u32,
}

impl CartItem {
    /// `None` when the line total does not fit in an `i64`.
    pub fn checked_line_total_cents(&self) -> Option<i64> {
        self.unit_price_cents.checked_mul(self.quantity as i64)
    }

    /// Saturates instead of overflowing.
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents.saturating_mul(self.quantity as i64)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CartState {
    pub items: Vec<CartItem>,
}

impl CartState {
    /// `None` when any line or the sum overflows.
    pub fn checked_total_cents(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |total, item| total.checked_add(item.checked_line_total_cents()?))
    }

    /// Saturating total; carts built through the HTTP API never reach the bound.
    pub fn total_cents(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.line_total_cents()))
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    /// Adds the item, or increases the quantity of the same product.
    AddItem { item: CartItem },
    RemoveItem { product_id: String },
    /// Quantity 0 removes the line.
    SetQuantity { product_id: String, quantity: u32 },
    Clear,
}

pub fn reduce(state: &CartState, action: CartAction) -> CartState {
    let mut items = state.items.clone();
    match action {
        CartAction::AddItem { item } => {
            if item.quantity == 0 {
                return CartState { items };
            }
            match items.iter_mut().find(|i| i.product_id == item.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity).min(MAX_QUANTITY);
                    // Latest price and name win
                    existing.unit_price_cents = item.unit_price_cents;
                    existing.name = item.name;
                }
                None => items.push(CartItem {
                    quantity: item.quantity.min(MAX_QUANTITY),
                    ..item
                }),
            }
        }
        CartAction::RemoveItem { product_id } => {
            items.retain(|i| i.product_id != product_id);
        }
        CartAction::SetQuantity {
            product_id,
            quantity,
        } => {
            if quantity == 0 {
                items.retain(|i| i.product_id != product_id);
            } else if let Some(existing) = items.iter_mut().find(|i| i.product_id == product_id) {
                existing.quantity = quantity.min(MAX_QUANTITY);
            }
        }
        CartAction::Clear => items.clear(),
    }
    CartState { items }
}
