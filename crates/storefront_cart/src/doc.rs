// File: crates/storefront_cart/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::CartView;
use crate::logic::{CartAction, CartItem, CartState};

#[utoipa::path(
    post,
    path = "/cart",
    responses((status = 201, description = "New empty cart", body = CartView)),
    tag = "Cart"
)]
fn doc_create_cart_handler() {}

#[utoipa::path(
    get,
    path = "/cart/{id}",
    params(("id" = String, Path, description = "Cart id")),
    responses(
        (status = 200, description = "Cart with totals", body = CartView),
        (status = 404, description = "Unknown cart")
    ),
    tag = "Cart"
)]
fn doc_get_cart_handler() {}

#[utoipa::path(
    post,
    path = "/cart/{id}/actions",
    params(("id" = String, Path, description = "Cart id")),
    request_body(content = CartAction, example = json!({
        "type": "add_item",
        "item": { "product_id": "17", "name": "Café", "unit_price_cents": 1250, "quantity": 2 }
    })),
    responses(
        (status = 200, description = "Cart after the action", body = CartView),
        (status = 400, description = "Invalid item"),
        (status = 404, description = "Unknown cart")
    ),
    tag = "Cart"
)]
fn doc_apply_action_handler() {}

#[utoipa::path(
    delete,
    path = "/cart/{id}",
    params(("id" = String, Path, description = "Cart id")),
    responses((status = 204, description = "Cart removed"), (status = 404, description = "Unknown cart")),
    tag = "Cart"
)]
fn doc_delete_cart_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_cart_handler,
        doc_get_cart_handler,
        doc_apply_action_handler,
        doc_delete_cart_handler
    ),
    components(schemas(CartView, CartAction, CartItem, CartState)),
    tags((name = "Cart", description = "Shopping cart API")),
    servers((url = "/api", description = "Storefront API server"))
)]
pub struct CartApiDoc;
