use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::CatalogConfig;
use crate::error::{CraftsError, Result};
use crate::model::Product;

/// Read-only source of catalog data.
///
/// Implementations:
/// - `CatalogClient`: the remote demo API over HTTP
pub trait CatalogSource: Send + Sync {
    /// Fetch up to `limit` products.
    fn fetch_products(
        &self,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Product>>> + Send;

    /// Fetch the category names, coerced to plain text.
    fn fetch_categories(&self) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

/// HTTP client for the dummyjson-style catalog API.
///
/// One request per call. No retry, no caching, no timeout beyond reqwest's
/// defaults; every failure comes back as `CraftsError::Catalog`.
pub struct CatalogClient {
    client: Client,
    base_url: String,
    featured_limit: usize,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            featured_limit: CatalogConfig::default().featured_limit,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            featured_limit: config.featured_limit,
            ..Self::new(config.base_url.clone())
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Products for the home page's featured section.
    pub async fn fetch_featured(&self) -> Result<Vec<Product>> {
        self.fetch_products(self.featured_limit).await
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        tracing::debug!(url, "catalog: GET");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(CraftsError::Catalog(format!(
                "catalog API error {status} for {url}"
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl CatalogSource for CatalogClient {
    async fn fetch_products(&self, limit: usize) -> Result<Vec<Product>> {
        let url = format!("{}/products?limit={limit}", self.base_url);
        let body = self.get_json(&url).await?;
        decode_products(body)
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        let url = format!("{}/products/categories", self.base_url);
        let body = self.get_json(&url).await?;
        Ok(decode_categories(body))
    }
}

#[derive(Deserialize)]
struct ProductsResponse {
    products: Vec<Product>,
}

/// Decode a `{ "products": [...] }` body.
pub fn decode_products(body: Value) -> Result<Vec<Product>> {
    let response: ProductsResponse = serde_json::from_value(body)?;
    Ok(response.products)
}

/// Coerce a categories body to plain names.
///
/// Strings pass through. Objects with a string `slug` use the slug, which is
/// what `Product::category` holds. Anything else uses its JSON text. A body
/// that is not an array yields no categories.
pub fn decode_categories(body: Value) -> Vec<String> {
    let Value::Array(items) = body else {
        tracing::warn!("catalog: categories body is not an array, ignoring");
        return Vec::new();
    };
    items.into_iter().map(category_text).collect()
}

fn category_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Object(ref map) => match map.get("slug") {
            Some(Value::String(slug)) => slug.clone(),
            _ => value.to_string(),
        },
        other => other.to_string(),
    }
}
