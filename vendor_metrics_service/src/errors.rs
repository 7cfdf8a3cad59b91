use thiserror::Error;
use vendor_metrics_engine::{SqliteDatabaseError, VendorMetricsError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Could not initialize the service. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the service. {0}")]
    BackendError(String),
}

impl From<SqliteDatabaseError> for ServiceError {
    fn from(e: SqliteDatabaseError) -> Self {
        Self::BackendError(e.to_string())
    }
}

impl From<VendorMetricsError> for ServiceError {
    fn from(e: VendorMetricsError) -> Self {
        Self::BackendError(e.to_string())
    }
}
