use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database connection error: {0}")]
    DriverError(#[from] sqlx::Error),
    #[error("Could not run database migrations: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("Vendor not found: {0}")]
    VendorNotFound(i64),
    #[error("Purchase order not found: {0}")]
    OrderNotFound(i64),
    #[error("A vendor with code {0} already exists")]
    DuplicateVendor(String),
    #[error("Cannot insert duplicate purchase order {0}")]
    DuplicateOrder(String),
}
