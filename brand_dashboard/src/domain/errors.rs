use crate::domain::ApiError;
use std::fmt;

// Caller-level errors for the dashboard workflows.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardError {
    // No stored session; the caller should send the user to login.
    NotAuthenticated,
    // Login succeeded upstream but the payload carried no usable token.
    MissingToken,
    Api(ApiError),
    Storage(String),
    Decode(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::NotAuthenticated => f.write_str("not logged in"),
            DashboardError::MissingToken => f.write_str("Missing token in response"),
            DashboardError::Api(err) => write!(f, "{err}"),
            DashboardError::Storage(err) => write!(f, "session storage error: {err}"),
            DashboardError::Decode(err) => write!(f, "unexpected report payload: {err}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for DashboardError {
    fn from(err: ApiError) -> Self {
        DashboardError::Api(err)
    }
}
