use crate::db_types::{NewPerformanceSnapshot, PerformanceSnapshot};

/// The append-only log of vendor metric snapshots. Snapshots are never modified or deleted.
#[allow(async_fn_in_trait)]
pub trait PerformanceHistory {
    type Error: std::error::Error;

    async fn insert_snapshot(&self, snapshot: NewPerformanceSnapshot) -> Result<PerformanceSnapshot, Self::Error>;

    /// Fetches all the snapshots for the vendor, oldest first.
    async fn fetch_snapshots(&self, vendor_id: i64) -> Result<Vec<PerformanceSnapshot>, Self::Error>;
}
