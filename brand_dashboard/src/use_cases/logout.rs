use crate::domain::{DashboardError, SessionStore};

// Whether a token was present before the clear.
pub struct LogoutResponse {
    pub cleared: bool,
}

// Clears the stored brand token.
pub struct LogoutUseCase<S> {
    pub store: S,
}

impl<S> LogoutUseCase<S>
where
    S: SessionStore,
{
    pub async fn execute(&self) -> Result<LogoutResponse, DashboardError> {
        let cleared = self
            .store
            .clear()
            .await
            .map_err(DashboardError::Storage)?;

        Ok(LogoutResponse { cleared })
    }
}
