//! Marketplace API client.
//!
//! Forwards product search and product detail requests to the upstream
//! marketplace and hands back its status and JSON body untouched.

use std::sync::Arc;

use axum::body::Bytes;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::GatewayConfig;

/// Errors that can occur when calling the marketplace.
#[derive(Debug, Error)]
pub enum MarketplaceError {
    /// Request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with something other than JSON.
    #[error("upstream returned non-JSON body (status {status}): {source}")]
    InvalidJson {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Base URL cannot carry a path.
    #[error("invalid marketplace base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Raw query string of `GET /api/search`.
///
/// Every field is kept as text so a malformed value never rejects the
/// request; [`SearchParams::from`] applies the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub category_id: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Search parameters forwarded to the marketplace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub category_id: Option<String>,
    pub page: i64,
    pub page_size: i64,
}

const fn default_page() -> i64 {
    1
}

const fn default_page_size() -> i64 {
    10
}

/// Parse an integer query value, falling back when absent or not a number.
fn int_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl From<SearchQuery> for SearchParams {
    fn from(query: SearchQuery) -> Self {
        Self {
            page: int_or(query.page.as_deref(), default_page()),
            page_size: int_or(query.page_size.as_deref(), default_page_size()),
            keyword: query.keyword,
            category_id: query.category_id.filter(|c| !c.is_empty()),
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            keyword: None,
            category_id: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// Upstream reply, relayed as-is.
///
/// `body` holds the exact bytes the marketplace sent, already checked to be
/// JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Client for the marketplace product API.
#[derive(Clone)]
pub struct MarketplaceClient {
    inner: Arc<MarketplaceClientInner>,
}

struct MarketplaceClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
    user_id: String,
}

impl MarketplaceClient {
    /// Create a new marketplace client.
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            inner: Arc::new(MarketplaceClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
                api_key: config.api_key.clone(),
                user_id: config.user_id.clone(),
            }),
        }
    }

    /// Build `{base}/product/search?...`.
    ///
    /// `keyword` and `category_id` are only sent when present.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError::InvalidBaseUrl` if the base URL cannot
    /// take path segments.
    pub fn search_url(&self, params: &SearchParams) -> Result<Url, MarketplaceError> {
        let mut url = self.endpoint(&["product", "search"])?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(keyword) = &params.keyword {
                query.append_pair("keyword", keyword);
            }
            query
                .append_pair("page", &params.page.to_string())
                .append_pair("page_size", &params.page_size.to_string());
            if let Some(category_id) = &params.category_id {
                query.append_pair("category_id", category_id);
            }
        }
        Ok(url)
    }

    /// Build `{base}/product/get?product_id=...&user_id=...`.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError::InvalidBaseUrl` if the base URL cannot
    /// take path segments.
    pub fn product_url(&self, product_id: &str) -> Result<Url, MarketplaceError> {
        let mut url = self.endpoint(&["product", "get"])?;
        url.query_pairs_mut()
            .append_pair("product_id", product_id)
            .append_pair("user_id", &self.inner.user_id);
        Ok(url)
    }

    /// Search marketplace products.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError` if the upstream cannot be reached or does
    /// not answer with JSON.
    #[instrument(skip(self), fields(keyword = ?params.keyword))]
    pub async fn search(
        &self,
        params: &SearchParams,
    ) -> Result<UpstreamResponse, MarketplaceError> {
        let url = self.search_url(params)?;
        self.get(url).await
    }

    /// Fetch one marketplace product.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError` if the upstream cannot be reached or does
    /// not answer with JSON.
    #[instrument(skip(self))]
    pub async fn product(&self, product_id: &str) -> Result<UpstreamResponse, MarketplaceError> {
        let url = self.product_url(product_id)?;
        self.get(url).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, MarketplaceError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| MarketplaceError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<UpstreamResponse, MarketplaceError> {
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(self.inner.api_key.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        serde_json::from_slice::<serde::de::IgnoredAny>(&bytes).map_err(|source| {
            tracing::warn!(
                status,
                body = %String::from_utf8_lossy(&bytes).chars().take(200).collect::<String>(),
                "Marketplace returned non-JSON body"
            );
            MarketplaceError::InvalidJson { status, source }
        })?;

        debug!(status, "Marketplace responded");
        Ok(UpstreamResponse {
            status,
            body: bytes,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> MarketplaceClient {
        MarketplaceClient::new(&GatewayConfig {
            api_base_url: Url::parse(base).unwrap(),
            api_key: SecretString::from("key"),
            user_id: "seller-7".to_string(),
            host: "127.0.0.1".parse().unwrap(),
            port: 5001,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
        })
    }

    #[test]
    fn test_search_url_with_all_params() {
        let params = SearchParams {
            keyword: Some("yoga mat".to_string()),
            category_id: Some("304".to_string()),
            page: 2,
            page_size: 20,
        };
        let url = client("https://api.daraz.com").search_url(&params).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.daraz.com/product/search?keyword=yoga+mat&page=2&page_size=20&category_id=304"
        );
    }

    #[test]
    fn test_search_url_omits_missing_params() {
        let url = client("https://api.daraz.com")
            .search_url(&SearchParams::default())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.daraz.com/product/search?page=1&page_size=10"
        );
    }

    fn query(pairs: &[(&str, &str)]) -> SearchParams {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        let uri: axum::http::Uri = format!("/api/search?{encoded}").parse().unwrap();
        let axum::extract::Query(raw) =
            axum::extract::Query::<SearchQuery>::try_from_uri(&uri).unwrap();
        raw.into()
    }

    #[test]
    fn test_non_numeric_paging_falls_back_to_defaults() {
        let params = query(&[("keyword", "x"), ("page", "abc"), ("page_size", "lots")]);
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 10);
        assert_eq!(params.keyword.as_deref(), Some("x"));
    }

    #[test]
    fn test_numeric_paging_is_kept() {
        let params = query(&[("page", " 3 "), ("page_size", "-5")]);
        assert_eq!(params.page, 3);
        assert_eq!(params.page_size, -5);
    }

    #[test]
    fn test_empty_category_is_dropped() {
        let params = query(&[("keyword", "mat"), ("category_id", "")]);
        assert_eq!(params.category_id, None);
        let url = client("https://api.daraz.com").search_url(&params).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.daraz.com/product/search?keyword=mat&page=1&page_size=10"
        );
    }

    #[test]
    fn test_product_url_carries_user_id() {
        let url = client("https://api.daraz.com/").product_url("1003").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.daraz.com/product/get?product_id=1003&user_id=seller-7"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let url = client("http://127.0.0.1:9000/v2").product_url("1").unwrap();
        assert_eq!(url.path(), "/v2/product/get");
    }
}
