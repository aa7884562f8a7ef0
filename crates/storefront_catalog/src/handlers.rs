// File: crates/storefront_catalog/src/handlers.rs
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use storefront_config::AppConfig;
use tracing::{info, warn};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

use crate::client::ProductApi;
use crate::error::CatalogError;
use crate::models::{Product, ProductPage};
use crate::search::SearchCoordinator;

pub const MAX_PAGE_LIMIT: u32 = 100;

pub struct CatalogState {
    pub config: Arc<AppConfig>,
    pub api: Arc<ProductApi>,
    pub search: SearchCoordinator,
}

impl CatalogState {
    fn ensure_enabled(&self) -> Result<(), CatalogError> {
        if self.config.use_catalog {
            Ok(())
        } else {
            Err(CatalogError::Disabled)
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(IntoParams, ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ListQuery {
    /// Page number starting at 1
    pub page: Option<u32>,
    /// Items per page (max 100)
    pub limit: Option<u32>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(IntoParams, ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SearchQuery {
    pub q: String,
    /// Client session; a newer search from the same session aborts the older one.
    pub session: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SearchResponse {
    pub query: String,
    pub items: Vec<Product>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListsResponse {
    pub items: Vec<Value>,
}

fn log_upstream(context: &str, err: &CatalogError) {
    if err.is_upstream() {
        warn!("[Catalog] {} failed: {}", context, err);
    }
}

impl CatalogError {
    fn is_upstream(&self) -> bool {
        matches!(
            self,
            CatalogError::Upstream(_)
                | CatalogError::UpstreamStatus { .. }
                | CatalogError::InvalidPayload(_)
                | CatalogError::InvalidProduct(_)
        )
    }
}

pub async fn list_products_handler(
    State(state): State<Arc<CatalogState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductPage>, CatalogError> {
    state.ensure_enabled()?;
    let page = query.page.unwrap_or(1);
    let limit = query
        .limit
        .unwrap_or_else(|| state.api.page_size())
        .clamp(1, MAX_PAGE_LIMIT);
    state
        .api
        .list(page, limit)
        .await
        .map(Json)
        .inspect_err(|e| log_upstream("Product listing", e))
}

pub async fn search_products_handler(
    State(state): State<Arc<CatalogState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, CatalogError> {
    state.ensure_enabled()?;
    let text = query.q.trim().to_string();
    if text.is_empty() {
        return Err(CatalogError::InvalidQuery("q must not be empty".to_string()));
    }

    let items = match query.session.as_deref() {
        Some(session) => state.search.search(session, text.clone()).await,
        None => state.api.search(&text).await,
    }
    .inspect_err(|e| log_upstream("Product search", e))?;

    info!("[Catalog] Search '{}' returned {} products", text, items.len());
    Ok(Json(SearchResponse { query: text, items }))
}

pub async fn get_product_handler(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CatalogError> {
    state.ensure_enabled()?;
    state
        .api
        .get_product(&id)
        .await
        .map(Json)
        .inspect_err(|e| log_upstream("Product lookup", e))
}

/// Every record of the lists resource, across all pages.
pub async fn get_lists_handler(
    State(state): State<Arc<CatalogState>>,
) -> Result<Json<ListsResponse>, CatalogError> {
    state.ensure_enabled()?;
    let resource = state.api.lists_resource().to_string();
    let items = state
        .api
        .fetch_all::<Value>(&resource)
        .await
        .inspect_err(|e| log_upstream("Lists fetch", e))?;
    Ok(Json(ListsResponse { items }))
}
