//! Shared HTTP client the endpoint bindings delegate to.
//!
//! The client owns the base URL, the bearer credential, and the reqwest
//! connection pool. Handlers build a path, hand it here, and get back the
//! decoded JSON body. Retries, rate limiting, and timeout policy beyond the
//! per-client default are deliberately out of scope.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Result, VultrError};

/// Base path for every Managed Database endpoint
pub(crate) const DATABASE_PATH: &str = "/v2/databases";

const DEFAULT_BASE_URL: &str = "https://api.vultr.com";
const DEFAULT_USER_AGENT: &str = concat!("vultr-databases/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Vultr Managed Database API
///
/// Cheap to clone; every clone shares the same connection pool. Handlers
/// take a client by value, so typical usage is:
///
/// ```rust,no_run
/// use vultr_databases::{DatabaseHandler, VultrClient};
///
/// # async fn example() -> Result<(), vultr_databases::VultrError> {
/// let client = VultrClient::builder().api_key("VULTR_API_KEY").build()?;
/// let (databases, _meta) = DatabaseHandler::new(client).list(None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VultrClient {
    http: reqwest::Client,
    base_url: String,
}

/// Builder for [`VultrClient`]
#[derive(Debug, Default)]
pub struct VultrClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl VultrClientBuilder {
    /// API key sent as a bearer credential on every request
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API base URL (defaults to `https://api.vultr.com`)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Per-request timeout (defaults to 30 seconds)
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration and build the client
    pub fn build(self) -> Result<VultrClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // Parse up front so a typo surfaces here, not on the first call.
        Url::parse(&base_url)?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        if let Some(key) = self.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| VultrError::Api {
                    status: 0,
                    message: "API key contains characters not valid in a header".to_string(),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            )
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(VultrError::Connection)?;

        Ok(VultrClient { http, base_url })
    }
}

impl VultrClient {
    /// Start building a client
    #[must_use]
    pub fn builder() -> VultrClientBuilder {
        VultrClientBuilder::default()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, url: String, body: Option<Value>) -> Result<reqwest::Response> {
        debug!(%method, %url, "sending API request");
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            trace!(%body, "request body");
            request = request.json(&body);
        }

        let response = request.send().await.map_err(VultrError::Connection)?;
        let status = response.status();
        debug!(status = %status, "received API response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let body = response.text().await.map_err(VultrError::Connection)?;
        trace!(%body, "response body");
        serde_json::from_str(&body).map_err(|e| VultrError::Deserialization {
            message: e.to_string(),
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, self.url(path), None).await?;
        Self::decode(response).await
    }

    /// GET with filter parameters encoded as a query string. None fields are
    /// omitted from the query entirely.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let encoded = serde_urlencoded::to_string(query)?;
        let url = if encoded.is_empty() {
            self.url(path)
        } else {
            format!("{}?{}", self.url(path), encoded)
        };
        let response = self.send(Method::GET, url, None).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_value(body)?;
        let response = self.send(Method::POST, self.url(path), Some(body)).await?;
        Self::decode(response).await
    }

    /// POST with no request body and no response body to decode
    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        self.send(Method::POST, self.url(path), None).await?;
        Ok(())
    }

    /// POST with no request body, decoding the response
    pub(crate) async fn post_no_body<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::POST, self.url(path), None).await?;
        Self::decode(response).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_value(body)?;
        let response = self.send(Method::PUT, self.url(path), Some(body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, self.url(path), None).await?;
        Ok(())
    }

    /// GET an arbitrary API path, returning the raw JSON body
    ///
    /// Escape hatch for endpoints the typed handlers do not cover yet.
    pub async fn get_raw(&self, path: &str) -> Result<Value> {
        let response = self.send(Method::GET, self.url(path), None).await?;
        Self::decode_raw(response).await
    }

    /// POST an arbitrary JSON body to an API path
    pub async fn post_raw(&self, path: &str, body: Value) -> Result<Value> {
        let response = self.send(Method::POST, self.url(path), Some(body)).await?;
        Self::decode_raw(response).await
    }

    /// PUT an arbitrary JSON body to an API path
    pub async fn put_raw(&self, path: &str, body: Value) -> Result<Value> {
        let response = self.send(Method::PUT, self.url(path), Some(body)).await?;
        Self::decode_raw(response).await
    }

    /// DELETE an arbitrary API path
    pub async fn delete_raw(&self, path: &str) -> Result<Value> {
        let response = self.send(Method::DELETE, self.url(path), None).await?;
        Self::decode_raw(response).await
    }

    async fn decode_raw(response: reqwest::Response) -> Result<Value> {
        let body = response.text().await.map_err(VultrError::Connection)?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| VultrError::Deserialization {
            message: e.to_string(),
        })
    }
}

fn to_value<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| VultrError::Deserialization {
        message: e.to_string(),
    })
}

/// Non-2xx responses carry `{"error": "...", "status": ...}`; fall back to
/// the raw body when that shape is absent.
fn api_error(status: u16, body: String) -> VultrError {
    #[derive(Deserialize)]
    struct ApiErrorBody {
        error: String,
    }

    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => body,
    };
    VultrError::Api { status, message }
}

/// Pagination cursor returned alongside list results
///
/// Opaque to the bindings; `links.next`/`links.prev` are passed back to the
/// API by the caller to continue a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// Continuation cursors within [`Meta`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub next: String,
    pub prev: String,
}
