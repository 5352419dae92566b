use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Url};
use serde_json::Value;

use crate::config::Config;

/// Synthetic status reported when no HTTP status was received at all.
pub const INTERNAL_ERROR_STATUS: u16 = 500;

/// One of the catalog API calls, described by path segments and query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
}

impl Endpoint {
    fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
        }
    }

    /// `GET /api/me`
    pub fn me() -> Self {
        Self::new(&["api", "me"])
    }

    /// `GET /api/catalog/search?query={query}&page=1`
    ///
    /// Only the first page is ever requested.
    pub fn catalog_search(query: &str) -> Self {
        let mut endpoint = Self::new(&["api", "catalog", "search"]);
        endpoint.query.push(("query", query.to_string()));
        endpoint.query.push(("page", "1".to_string()));
        endpoint
    }

    /// `GET /api/book/{book_id}`
    pub fn book(book_id: &str) -> Self {
        Self::new(&["api", "book", book_id])
    }

    /// Unencoded path and query, for logs and assertions.
    pub fn path(&self) -> String {
        let mut path = format!("/{}", self.segments.join("/"));
        if !self.query.is_empty() {
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            path.push('?');
            path.push_str(&pairs.join("&"));
        }
        path
    }

    fn to_url(&self, api_base: &str) -> Result<Url, TransportError> {
        let mut url =
            Url::parse(api_base).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(format!("{} cannot be a base", api_base)))?
            .pop_if_empty()
            .extend(&self.segments);

        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }
}

/// Outcome of a catalog call: the parsed body (if any) and the status code.
///
/// Every failure collapses into this pair; callers never see an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub body: Option<Value>,
    pub status: u16,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            body: Some(body),
            status: 200,
        }
    }

    pub fn failed(status: u16) -> Self {
        Self { body: None, status }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// The body, unless it is missing, `null`, `{}` or `[]`.
    pub fn usable_body(&self) -> Option<&Value> {
        match &self.body {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) if map.is_empty() => None,
            Some(Value::Array(items)) if items.is_empty() => None,
            Some(body) => Some(body),
        }
    }
}

/// Transport-level failures. Logged with their kind, then reported as status 500.
#[derive(Debug, thiserror::Error)]
enum TransportError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("timeout: {0}")]
    Timeout(reqwest::Error),
    #[error("connect: {0}")]
    Connect(reqwest::Error),
    #[error("decode: {0}")]
    Decode(reqwest::Error),
    #[error("request: {0}")]
    Request(reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e)
        } else if e.is_connect() {
            TransportError::Connect(e)
        } else if e.is_decode() {
            TransportError::Decode(e)
        } else {
            TransportError::Request(e)
        }
    }
}

/// Source of catalog data for the tool handlers.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch(&self, endpoint: &Endpoint) -> ApiResponse;
}

/// Authenticated HTTP client for a NeoDB instance.
pub struct NeoDbClient {
    api_base: String,
    access_token: String,
    client: reqwest::Client,
}

impl NeoDbClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_base: config.api_base.clone(),
            access_token: config.access_token.clone(),
            client,
        })
    }

    async fn try_fetch(&self, endpoint: &Endpoint) -> Result<ApiResponse, TransportError> {
        let url = endpoint.to_url(&self.api_base)?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(ApiResponse::failed(status.as_u16()));
        }

        let body: Value = response.json().await?;
        Ok(ApiResponse::ok(body))
    }
}

#[async_trait]
impl CatalogApi for NeoDbClient {
    async fn fetch(&self, endpoint: &Endpoint) -> ApiResponse {
        log::debug!("NeoDB: GET {}", endpoint.path());

        match self.try_fetch(endpoint).await {
            Ok(response) => {
                if !response.is_success() {
                    log::warn!("NeoDB: {} returned status {}", endpoint.path(), response.status);
                }
                response
            }
            Err(e) => {
                log::warn!("NeoDB: {} failed ({})", endpoint.path(), e);
                ApiResponse::failed(INTERNAL_ERROR_STATUS)
            }
        }
    }
}
