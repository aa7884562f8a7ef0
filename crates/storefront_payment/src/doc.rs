// --- File: crates/storefront_payment/src/doc.rs ---

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{CardValidationResponse, CheckoutRequest, CheckoutResponse};
use crate::logic::{CardBrand, CardDetails, PaymentMethod};

#[utoipa::path(
    post,
    path = "/payment/validate-card",
    request_body = CardDetails,
    responses(
        (status = 200, description = "Validation result with per-field errors", body = CardValidationResponse),
        (status = 503, description = "Payments disabled")
    ),
    tag = "Payment"
)]
fn doc_validate_card_handler() {}

#[utoipa::path(
    post,
    path = "/payment/checkout",
    request_body(content = CheckoutRequest, example = json!({
        "order_reference": "cart-42",
        "amount_cents": 2500,
        "method": { "type": "card", "number": "4539 1488 0343 6467", "holder": "Ana García", "expiry": "12/30", "cvc": "123" }
    })),
    responses(
        (status = 201, description = "Payment authorized (card) or pending (pay later)", body = CheckoutResponse),
        (status = 400, description = "Invalid amount or method not accepted"),
        (status = 422, description = "Invalid card details"),
        (status = 502, description = "Payment processing failed")
    ),
    tag = "Payment"
)]
fn doc_checkout_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_validate_card_handler, doc_checkout_handler),
    components(schemas(
        CardDetails,
        CardBrand,
        PaymentMethod,
        CardValidationResponse,
        CheckoutRequest,
        CheckoutResponse
    )),
    tags((name = "Payment", description = "Simulated checkout API")),
    servers((url = "/api", description = "Storefront API server"))
)]
pub struct PaymentApiDoc;
