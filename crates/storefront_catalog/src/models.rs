// --- File: crates/storefront_catalog/src/models.rs ---
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::CatalogError;

/// Upstream ids come as numbers or strings.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ApiId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ApiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiId::Number(n) => write!(f, "{}", n),
            ApiId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Product as returned by the products API. Spanish field names are accepted.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiProduct {
    pub id: ApiId,
    #[serde(alias = "nombre")]
    pub name: Option<String>,
    #[serde(alias = "descripcion")]
    pub description: Option<String>,
    /// Decimal price in currency units, e.g. 12.5
    #[serde(alias = "precio")]
    pub price: Option<f64>,
    #[serde(alias = "moneda")]
    pub currency: Option<String>,
    #[serde(alias = "imagen", alias = "image")]
    pub image_url: Option<String>,
    #[serde(alias = "categoria")]
    pub category: Option<String>,
    pub stock: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Product {
    #[cfg_attr(feature = "openapi", schema(example = "17"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Café de Chiapas 500g"))]
    pub name: String,
    pub description: Option<String>,
    /// Price in the smallest currency unit.
    #[cfg_attr(feature = "openapi", schema(example = 1250))]
    pub price_cents: i64,
    #[cfg_attr(feature = "openapi", schema(example = "EUR"))]
    pub currency: String,
    #[cfg_attr(feature = "openapi", schema(example = "€12.50"))]
    pub formatted_price: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock: Option<u32>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock.map_or(true, |s| s > 0)
    }
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProductPage {
    pub page: u32,
    pub limit: u32,
    pub items: Vec<Product>,
    /// Set when the API reports a total.
    pub total: Option<u64>,
}

/// Listing payloads come either bare or wrapped in `{ "data": [...] }`.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Items(Vec<T>),
    Wrapped {
        #[serde(alias = "items", alias = "results")]
        data: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
}

impl<T> ListEnvelope<T> {
    pub fn into_parts(self) -> (Vec<T>, Option<u64>) {
        match self {
            ListEnvelope::Items(items) => (items, None),
            ListEnvelope::Wrapped { data, total } => (data, total),
        }
    }
}

/// Maps the upstream product to the storefront model.
/// A missing name or a negative/non-finite price is an error.
pub fn map_product(api: ApiProduct, default_currency: &str) -> Result<Product, CatalogError> {
    let id = api.id.to_string();
    let name = api
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| CatalogError::InvalidProduct(format!("product {} has no name", id)))?;

    let price = api.price.unwrap_or(0.0);
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::InvalidProduct(format!(
            "product {} has invalid price {}",
            id, price
        )));
    }
    let price_cents = (price * 100.0).round() as i64;

    let currency = api
        .currency
        .filter(|c| !c.trim().is_empty())
        .map(|c| c.trim().to_uppercase())
        .unwrap_or_else(|| default_currency.to_string());

    Ok(Product {
        formatted_price: format_price(price_cents, &currency),
        id,
        name,
        description: api.description.filter(|d| !d.trim().is_empty()),
        price_cents,
        currency,
        image_url: api.image_url.filter(|u| !u.trim().is_empty()),
        category: api.category,
        stock: api.stock.map(|s| s.max(0) as u32),
    })
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "EUR" => Some("€"),
        "USD" | "MXN" => Some("$"),
        _ => None,
    }
}

/// "€12.50", "$3.05", or "12.50 CHF" for currencies without a known symbol.
pub fn format_price(cents: i64, currency: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let amount = format!("{}.{:02}", abs / 100, abs % 100);
    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}{}", sign, symbol, amount),
        None => format!("{}{} {}", sign, amount, currency),
    }
}
