use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, header};
use serde_json::Value;
use url::Url;

use crate::config::CrispConfig;
use crate::error::{Error, Result};

/// Path prefix of the REST API version this client speaks.
pub const API_VERSION_PREFIX: &str = "/v1";

/// Value of the `X-Crisp-Tier` header sent with every request.
pub const CRISP_TIER: &str = "plugin";

/// Something that can perform one authenticated API call.
///
/// Implementations return the envelope's `data` field: `Some` for an object or
/// array, `None` when the API sent nothing (or `null`).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform `method` on `path` (which already carries any query string),
    /// sending `body` as JSON when present.
    async fn request(&self, method: Method, path: &str, body: Option<Value>)
    -> Result<Option<Value>>;
}

/// Client for the Crisp REST API.
#[derive(Debug, Clone)]
pub struct Crisp {
    client: ReqwestClient,
    api_url: String,
    token: String,
}

impl Crisp {
    /// Create a new client from the resolved configuration.
    ///
    /// No timeout is configured; the transport defaults apply.
    pub fn new(config: &CrispConfig) -> Result<Self> {
        let api_url = Url::parse(&config.api_url)?;
        let client = ReqwestClient::builder().build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            api_url: api_url.as_str().trim_end_matches('/').to_string(),
            token: config.credentials.basic_token(),
        })
    }

    /// The full URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.api_url, API_VERSION_PREFIX, path)
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let authorization = HeaderValue::from_str(&format!("Basic {}", self.token))
            .map_err(|e| Error::http_client("Invalid credentials", Some(Box::new(e))))?;
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert("x-crisp-tier", HeaderValue::from_static(CRISP_TIER));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }
}

#[async_trait]
impl Transport for Crisp {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        let url = self.endpoint(path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .client
            .request(method, &url)
            .headers(self.default_headers()?);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(format!("Request timed out: {}", e))
            } else if e.is_connect() {
                Error::connection(e.to_string(), Some(Box::new(e)))
            } else {
                Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            Error::http_client(
                format!("Failed to read response: {}", e),
                Some(Box::new(e)),
            )
        })?;
        tracing::debug!(%status, bytes = text.len(), "received response");

        decode_envelope(&text).inspect_err(|e| tracing::debug!(error = %e, "request failed"))
    }
}

/// Decode a response body into the envelope's `data` payload.
///
/// The HTTP status is not consulted: a body that is not a JSON object is a
/// decode error, and an object with a truthy `error` is an API error.
pub fn decode_envelope(body: &str) -> Result<Option<Value>> {
    let envelope = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(envelope)) => envelope,
        _ => return Err(Error::decode(body)),
    };

    if envelope.get("error").is_some_and(is_truthy) {
        let reason = envelope
            .get("reason")
            .filter(|r| is_truthy(r))
            .or_else(|| envelope.get("error"))
            .map(describe)
            .unwrap_or_default();
        return Err(Error::api(reason));
    }

    Ok(envelope.get("data").cloned().filter(|data| !data.is_null()))
}

/// Truthiness of a JSON value the way the API's envelope flag is meant.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A JSON value as message text: strings without quotes, anything else as JSON.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
