use serde_json::Value;

use crate::domain::{
    BrandApi, DashboardError, HttpMethod, RequestOptions, SessionStore, truthy_scalar,
};
use crate::interface_adapters::protocol::LoginRequest;

pub const LOGIN_PATH: &str = "/auth/login";

// Response returned by the login use case.
pub struct LoginResponse {
    pub token: String,
}

// Login use case with injected dependencies.
pub struct LoginUseCase<A, S> {
    pub api: A,
    pub store: S,
}

impl<A, S> LoginUseCase<A, S>
where
    A: BrandApi,
    S: SessionStore,
{
    #[tracing::instrument(name = "login", skip_all)]
    pub async fn execute(&self, email: &str, password: &str) -> Result<LoginResponse, DashboardError> {
        let body = serde_json::to_value(LoginRequest { email, password })
            .map_err(|err| DashboardError::Decode(err.to_string()))?;
        let options = RequestOptions::new()
            .with_method(HttpMethod::Post)
            .with_body(body);

        let payload = self.api.fetch(LOGIN_PATH, options).await?;
        let token = extract_token(&payload).ok_or(DashboardError::MissingToken)?;

        self.store
            .set(token.clone())
            .await
            .map_err(DashboardError::Storage)?;

        tracing::info!("login succeeded; session stored.");
        Ok(LoginResponse { token })
    }
}

// Empty, zero, false and structured tokens count as missing.
fn extract_token(payload: &Value) -> Option<String> {
    payload.get("token").and_then(truthy_scalar)
}
