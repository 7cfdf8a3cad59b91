use crate::db::traits::{PerformanceHistory, PurchaseOrderManagement, VendorManagement};

/// This trait defines the highest level of behaviour for backends supporting the vendor metrics engine: a store that
/// can hold vendors, their orders and their performance history.
#[allow(async_fn_in_trait)]
pub trait VendorMetricsDatabase: Clone + VendorManagement + PurchaseOrderManagement + PerformanceHistory {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Closes the database connection pool.
    async fn close(&mut self);
}
