//! Takes the weekly performance snapshots and reads a vendor's history back.
use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;

use crate::{
    db::traits::{PerformanceHistory, VendorManagement},
    db_types::PerformanceSnapshot,
    events::{EventProducers, SnapshotCompletedEvent},
    snapshot::{self, SnapshotReport},
    vme_api::errors::VendorMetricsError,
};

pub struct PerformanceHistoryApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B: Debug> Debug for PerformanceHistoryApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PerformanceHistoryApi ({:?})", self.db)
    }
}

impl<B> PerformanceHistoryApi<B>
where B: VendorManagement + PerformanceHistory
{
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }

    /// Snapshots every vendor's metrics as of `now` and notifies `on_snapshot_completed` subscribers with the report.
    pub async fn run_weekly_snapshot(&self, now: DateTime<Utc>) -> Result<SnapshotReport, VendorMetricsError> {
        let report = snapshot::run_weekly_snapshot(&self.db, now).await?;
        self.producers.publish_snapshot_completed(SnapshotCompletedEvent::new(report.clone())).await;
        Ok(report)
    }

    /// The vendor's performance history, oldest first.
    pub async fn history_for_vendor(&self, vendor_id: i64) -> Result<Vec<PerformanceSnapshot>, VendorMetricsError> {
        if self.db.fetch_vendor(vendor_id).await.map_err(VendorMetricsError::database)?.is_none() {
            debug!("📸️ No history for vendor #{vendor_id}. The vendor does not exist.");
            return Err(VendorMetricsError::VendorNotFound(vendor_id));
        }
        self.db.fetch_snapshots(vendor_id).await.map_err(VendorMetricsError::database)
    }
}
