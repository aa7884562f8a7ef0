// File: crates/storefront_cart/src/handlers.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use storefront_common::SessionMap;
use storefront_config::AppConfig;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::CartError;
use crate::logic::{reduce, CartAction, CartItem, CartState, MAX_UNIT_PRICE_CENTS};

pub const DEFAULT_CURRENCY: &str = "EUR";

/// In-memory carts keyed by id. Carts idle past the session TTL are dropped.
pub struct CartStore {
    pub config: Arc<AppConfig>,
    pub carts: Mutex<SessionMap<Uuid, CartState>>,
}

impl CartStore {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            carts: Mutex::new(SessionMap::from_config(config.sessions.as_ref())),
            config,
        }
    }

    fn ensure_enabled(&self) -> Result<(), CartError> {
        if self.config.use_cart {
            Ok(())
        } else {
            Err(CartError::Disabled)
        }
    }

    fn currency(&self) -> String {
        self.config
            .payment
            .as_ref()
            .and_then(|p| p.currency.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }

    fn view(&self, cart_id: Uuid, cart: &CartState) -> CartView {
        CartView {
            cart_id,
            items: cart.items.clone(),
            item_count: cart.item_count(),
            total_cents: cart.total_cents(),
            currency: self.currency(),
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CartView {
    pub cart_id: Uuid,
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub total_cents: i64,
    pub currency: String,
}

fn validate_action(action: &CartAction) -> Result<(), CartError> {
    if let CartAction::AddItem { item } = action {
        if item.product_id.trim().is_empty() {
            return Err(CartError::InvalidItem("product_id is required".to_string()));
        }
        if item.unit_price_cents < 0 {
            return Err(CartError::InvalidItem(format!(
                "negative price for product {}",
                item.product_id
            )));
        }
        if item.unit_price_cents > MAX_UNIT_PRICE_CENTS {
            return Err(CartError::InvalidItem(format!(
                "price of product {} exceeds {} cents",
                item.product_id, MAX_UNIT_PRICE_CENTS
            )));
        }
    }
    Ok(())
}

pub async fn create_cart_handler(
    State(store): State<Arc<CartStore>>,
) -> Result<(StatusCode, Json<CartView>), CartError> {
    store.ensure_enabled()?;
    let cart_id = Uuid::new_v4();
    let cart = CartState::default();
    let view = store.view(cart_id, &cart);
    store.carts.lock().await.insert(cart_id, cart, Utc::now())?;
    info!("[Cart] Created cart {}", cart_id);
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_cart_handler(
    State(store): State<Arc<CartStore>>,
    Path(cart_id): Path<Uuid>,
) -> Result<Json<CartView>, CartError> {
    store.ensure_enabled()?;
    let mut carts = store.carts.lock().await;
    let cart = carts
        .get(&cart_id, Utc::now())
        .ok_or(CartError::NotFound(cart_id))?;
    Ok(Json(store.view(cart_id, cart)))
}

pub async fn apply_action_handler(
    State(store): State<Arc<CartStore>>,
    Path(cart_id): Path<Uuid>,
    Json(action): Json<CartAction>,
) -> Result<Json<CartView>, CartError> {
    store.ensure_enabled()?;
    validate_action(&action)?;

    let mut carts = store.carts.lock().await;
    let cart = carts
        .get_mut(&cart_id, Utc::now())
        .ok_or(CartError::NotFound(cart_id))?;
    debug!("[Cart] {} <- {:?}", cart_id, action);
    let next = reduce(cart, action);
    // The stored cart only changes when its total is representable
    if next.checked_total_cents().is_none() {
        return Err(CartError::InvalidItem(
            "cart total exceeds the supported amount".to_string(),
        ));
    }
    *cart = next;
    Ok(Json(store.view(cart_id, cart)))
}

pub async fn delete_cart_handler(
    State(store): State<Arc<CartStore>>,
    Path(cart_id): Path<Uuid>,
) -> Result<StatusCode, CartError> {
    store.ensure_enabled()?;
    store
        .carts
        .lock()
        .await
        .remove(&cart_id, Utc::now())
        .ok_or(CartError::NotFound(cart_id))?;
    Ok(StatusCode::NO_CONTENT)
}
