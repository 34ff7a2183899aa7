use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use super::values::truthy_scalar;

// HTTP verbs the dashboard issues against the brand API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call request descriptor. The path is passed separately to [`BrandApi::fetch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    // Bearer token attached as the Authorization header when present.
    pub token: Option<String>,
    // JSON body; `None` sends no body at all.
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

// Single error channel for one API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // Network unreachable, DNS, connection reset, unreadable body.
    Transport(String),
    // Upstream answered with a non-2xx status.
    Status { status: u16, message: String },
}

impl ApiError {
    // Message for a failed status, preferring a truthy upstream `error` field.
    pub fn from_status(status: u16, payload: &Value) -> Self {
        let message = payload
            .get("error")
            .and_then(truthy_scalar)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "network request failed: {err}"),
            ApiError::Status { message, .. } => f.write_str(message),
        }
    }
}

impl std::error::Error for ApiError {}

// The use cases depend on this trait, not the concrete reqwest client.
// The payload is `Value::Null` when the response body is empty or not JSON.
#[async_trait]
pub trait BrandApi: Send + Sync {
    async fn fetch(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError>;
}
