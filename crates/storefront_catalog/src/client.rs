// --- File: crates/storefront_catalog/src/client.rs ---
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use storefront_common::{join_url, HTTP_CLIENT};
use storefront_config::ApiConfig;
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::models::{map_product, ApiProduct, ListEnvelope, Product, ProductPage};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_PRODUCTS_RESOURCE: &str = "productos";
pub const DEFAULT_LISTS_RESOURCE: &str = "listas";
pub const DEFAULT_CURRENCY: &str = "EUR";
/// Upper bound on pages followed by [`ProductApi::fetch_all`].
pub const MAX_PAGES: u32 = 500;

/// Client for the products REST API.
#[derive(Debug, Clone)]
pub struct ProductApi {
    client: Client,
    base_url: String,
    products_resource: String,
    lists_resource: String,
    page_size: u32,
    api_key: Option<String>,
    timeout: Option<Duration>,
    currency: String,
}

impl ProductApi {
    pub fn new(client: Client, api: &ApiConfig, currency: Option<&str>) -> Self {
        Self {
            client,
            base_url: api.base_url.clone(),
            products_resource: api
                .products_resource
                .clone()
                .unwrap_or_else(|| DEFAULT_PRODUCTS_RESOURCE.to_string()),
            lists_resource: api
                .lists_resource
                .clone()
                .unwrap_or_else(|| DEFAULT_LISTS_RESOURCE.to_string()),
            page_size: api.page_size.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE_SIZE),
            api_key: api.api_key().map(str::to_string),
            timeout: api.timeout_secs.map(Duration::from_secs),
            currency: currency.unwrap_or(DEFAULT_CURRENCY).to_string(),
        }
    }

    /// Uses the shared HTTP client.
    pub fn from_config(api: &ApiConfig, currency: Option<&str>) -> Self {
        Self::new(HTTP_CLIENT.clone(), api, currency)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn lists_resource(&self) -> &str {
        &self.lists_resource
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = join_url(&self.base_url, path);
        debug!("[Catalog] GET {}", url);
        let mut builder = self.client.get(url);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, CatalogError> {
        let response = builder.send().await?;
        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            warn!("[Catalog] Products API returned HTTP {}: {}", status, body_text);
            return Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
                message: body_text,
            });
        }
        Ok(serde_json::from_str(&body_text)?)
    }

    /// Maps every product, dropping (and logging) the ones that do not map.
    fn map_products(&self, items: Vec<ApiProduct>) -> Vec<Product> {
        items
            .into_iter()
            .filter_map(|item| match map_product(item, &self.currency) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!("[Catalog] Skipping product: {}", e);
                    None
                }
            })
            .collect()
    }

    /// One page of products. Pages start at 1.
    pub async fn list(&self, page: u32, limit: u32) -> Result<ProductPage, CatalogError> {
        let page = page.max(1);
        let limit = if limit == 0 { self.page_size } else { limit };
        let builder = self
            .get(&self.products_resource)
            .query(&[("page", page), ("limit", limit)]);
        let envelope: ListEnvelope<ApiProduct> = self.send_json(builder).await?;
        let (items, total) = envelope.into_parts();
        Ok(ProductPage {
            page,
            limit,
            items: self.map_products(items),
            total,
        })
    }

    /// Products matching `query`.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidQuery("search query is empty".to_string()));
        }
        let builder = self.get(&self.products_resource).query(&[("q", query)]);
        let envelope: ListEnvelope<ApiProduct> = self.send_json(builder).await?;
        Ok(self.map_products(envelope.into_parts().0))
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        let path = format!("{}/{}", self.products_resource, id);
        let response = self.get(&path).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            warn!("[Catalog] Products API returned HTTP {} for {}: {}", status, id, body_text);
            return Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
                message: body_text,
            });
        }
        let api: ApiProduct = serde_json::from_str(&body_text)?;
        map_product(api, &self.currency)
    }

    /// Every record of `resource`, following pages until a short one.
    pub async fn fetch_all<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, CatalogError> {
        let mut all = Vec::new();
        for page in 1..=MAX_PAGES {
            let builder = self
                .get(resource)
                .query(&[("page", page), ("limit", self.page_size)]);
            let envelope: ListEnvelope<T> = self.send_json(builder).await?;
            let (items, _) = envelope.into_parts();
            let received = items.len();
            all.extend(items);
            if received < self.page_size as usize {
                info!("[Catalog] Fetched {} records from {} in {} page(s)", all.len(), resource, page);
                return Ok(all);
            }
        }
        warn!("[Catalog] Stopped fetching {} after {} pages", resource, MAX_PAGES);
        Ok(all)
    }
}
