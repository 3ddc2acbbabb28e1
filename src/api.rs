use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Non-2xx response; carries the message extracted from the body's
    /// `message` field, falling back to the HTTP status text.
    #[error("{0}")]
    Remote(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// JSON envelope every backend endpoint wraps its payload in:
/// `{status, message, data: {data: [...]}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl ApiEnvelope {
    /// The row array at `data.data`, or empty if the envelope carries no
    /// list payload (mutation acknowledgements).
    pub fn rows(&self) -> Vec<Value> {
        self.data
            .get("data")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default()
    }
}

/// Request/response collaborator the stores call. One failure surfaces
/// once; no retry logic lives behind this seam.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<ApiEnvelope, ApiError>;

    async fn get(&self, path: &str) -> Result<ApiEnvelope, ApiError> {
        self.request(path, Method::Get, None).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<ApiEnvelope, ApiError> {
        self.request(path, Method::Post, body).await
    }

    async fn put(&self, path: &str, body: Option<Value>) -> Result<ApiEnvelope, ApiError> {
        self.request(path, Method::Put, body).await
    }

    async fn delete(&self, path: &str) -> Result<ApiEnvelope, ApiError> {
        self.request(path, Method::Delete, None).await
    }
}

/// Reqwest-backed client against the real backend.
pub struct HttpApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<ApiEnvelope, ApiError> {
        let url = self.url(path);
        let mut req = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let fallback = status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string();
            let message = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .and_then(|m| m.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or(fallback);
            return Err(ApiError::Remote(message));
        }

        resp.json::<ApiEnvelope>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
