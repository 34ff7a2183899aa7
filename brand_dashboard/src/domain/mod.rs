mod api;
mod errors;
mod reports;
mod session;
mod values;

// Report types, API and session ports, and the loose-payload helpers.
pub use api::{ApiError, BrandApi, HttpMethod, RequestOptions};
pub use errors::DashboardError;
pub use reports::{
    CityUnits, DailyUnits, DashboardReport, DateRange, ProductUnits, RedemptionTotals,
    RedemptionsReport, TraceabilityReport,
};
pub use session::{SessionState, SessionStore};
pub use values::{display_value, is_truthy, truthy_scalar};
