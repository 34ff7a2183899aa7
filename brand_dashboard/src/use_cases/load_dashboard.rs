use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{
    BrandApi, DashboardError, DashboardReport, DateRange, RequestOptions, SessionStore,
};

pub const REDEMPTIONS_PATH: &str = "/brand/reports/redemptions";
pub const TRACEABILITY_PATH: &str = "/brand/reports/traceability";

// Dashboard load use case with injected dependencies.
pub struct LoadDashboardUseCase<A, S> {
    pub api: A,
    pub store: S,
}

impl<A, S> LoadDashboardUseCase<A, S>
where
    A: BrandApi,
    S: SessionStore,
{
    #[tracing::instrument(name = "load_dashboard", skip_all, fields(from = ?range.from, to = ?range.to))]
    pub async fn execute(&self, range: DateRange) -> Result<DashboardReport, DashboardError> {
        let token = self
            .store
            .get()
            .await
            .map_err(DashboardError::Storage)?
            .ok_or(DashboardError::NotAuthenticated)?;

        let traceability_path = traceability_path(&range);

        // Both reports are independent; issue them together and fail on the first error.
        let (redemptions, traceability) = tokio::try_join!(
            self.api
                .fetch(REDEMPTIONS_PATH, RequestOptions::new().with_token(token.clone())),
            self.api
                .fetch(&traceability_path, RequestOptions::new().with_token(token.clone())),
        )?;

        tracing::info!("dashboard reports loaded.");
        Ok(DashboardReport {
            redemptions: decode_report(redemptions)?,
            traceability: decode_report(traceability)?,
        })
    }
}

pub fn traceability_path(range: &DateRange) -> String {
    match range.query() {
        Some(query) => format!("{TRACEABILITY_PATH}?{query}"),
        None => TRACEABILITY_PATH.to_string(),
    }
}

// A null payload renders as an all-zero report rather than failing the view.
fn decode_report<T>(payload: Value) -> Result<T, DashboardError>
where
    T: DeserializeOwned + Default,
{
    if payload.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(payload).map_err(|err| DashboardError::Decode(err.to_string()))
}
