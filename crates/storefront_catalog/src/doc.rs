// File: crates/storefront_catalog/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{ListQuery, ListsResponse, SearchQuery, SearchResponse};
use crate::models::{Product, ProductPage};

#[utoipa::path(
    get,
    path = "/products",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 502, description = "Products API unavailable")
    ),
    tag = "Catalog"
)]
fn doc_list_products_handler() {}

#[utoipa::path(
    get,
    path = "/products/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = SearchResponse),
        (status = 400, description = "Empty query"),
        (status = 409, description = "Superseded by a newer search from the same session"),
        (status = 502, description = "Products API unavailable")
    ),
    tag = "Catalog"
)]
fn doc_search_products_handler() {}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Unknown product")
    ),
    tag = "Catalog"
)]
fn doc_get_product_handler() {}

#[utoipa::path(
    get,
    path = "/lists",
    responses((status = 200, description = "All list records", body = ListsResponse)),
    tag = "Catalog"
)]
fn doc_get_lists_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_list_products_handler,
        doc_search_products_handler,
        doc_get_product_handler,
        doc_get_lists_handler
    ),
    components(schemas(ListQuery, SearchQuery, SearchResponse, ListsResponse, Product, ProductPage)),
    tags((name = "Catalog", description = "Product browsing API")),
    servers((url = "/api", description = "Storefront API server"))
)]
pub struct CatalogApiDoc;
