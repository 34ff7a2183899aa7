use crate::domain::{ApiError, BrandApi, HttpMethod, RequestOptions};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;

// Thin wrapper around reqwest for brand API calls.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    pub base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    // Absolute paths pass through; everything else is appended to the base URL verbatim.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

// Empty or malformed bodies are treated as "no payload", never as an error.
fn parse_payload(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or(Value::Null)
}

#[async_trait]
impl BrandApi for ApiClient {
    #[tracing::instrument(name = "api_fetch", skip_all, fields(method = %options.method, path = %path))]
    async fn fetch(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let url = self.resolve_url(path);

        let mut request = self
            .http
            .request(to_reqwest_method(options.method), url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = options.token.as_deref().filter(|token| !token.is_empty()) {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        if let Some(body) = &options.body {
            let body = serde_json::to_vec(body)
                .map_err(|err| ApiError::Transport(err.to_string()))?;
            request = request.body(body);
        }

        let res = request.send().await.map_err(|err| {
            tracing::warn!(error = %err, "api request failed.");
            ApiError::Transport(err.to_string())
        })?;
        let status = res.status();

        // Read the whole body as text first so empty bodies are tolerated.
        let text = res
            .text()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let payload = parse_payload(&text);

        // Keep the upstream status and message so callers can show them directly.
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "api responded with failure status.");
            return Err(ApiError::from_status(status.as_u16(), &payload));
        }

        tracing::debug!(status = status.as_u16(), "api request succeeded.");
        Ok(payload)
    }
}
