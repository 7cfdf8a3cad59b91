use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VendorMetricsError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Vendor not found: {0}")]
    VendorNotFound(i64),
    #[error("Purchase order not found: {0}")]
    OrderNotFound(i64),
    #[error("Validation failed. {0}")]
    ValidationViolation(String),
}

impl VendorMetricsError {
    /// Wraps a backend error. Use with `map_err`.
    pub fn database<E: std::error::Error>(e: E) -> Self {
        Self::DatabaseError(e.to_string())
    }

    pub fn invalid<S: Into<String>>(reason: S) -> Self {
        Self::ValidationViolation(reason.into())
    }
}
