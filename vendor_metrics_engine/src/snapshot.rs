//! # Performance history snapshots
//!
//! [`run_weekly_snapshot`] copies every vendor's current metrics into the append-only performance history. It is
//! meant to be driven by a scheduler, one run at a time.
//!
//! A failure to store one vendor's snapshot is logged and recorded in the [`SnapshotReport`], and the run moves on to
//! the next vendor. Failed vendors are not retried within the run.
use chrono::{DateTime, Utc};
use log::*;
use serde::Serialize;

use crate::{
    db::traits::{PerformanceHistory, VendorManagement},
    db_types::{NewPerformanceSnapshot, PerformanceSnapshot},
    vme_api::errors::VendorMetricsError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotFailure {
    pub vendor_id: i64,
    pub reason: String,
}

/// The outcome of one snapshot run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotReport {
    /// The date stamped on every snapshot in this run
    pub taken_at: DateTime<Utc>,
    pub snapshots: Vec<PerformanceSnapshot>,
    pub failures: Vec<SnapshotFailure>,
}

impl SnapshotReport {
    pub fn new(taken_at: DateTime<Utc>) -> Self {
        Self { taken_at, snapshots: Vec::new(), failures: Vec::new() }
    }

    pub fn success_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Appends one snapshot, dated `now`, for every registered vendor.
///
/// Only a failure to list the vendors fails the run as a whole. Per-vendor failures are collected in the report.
pub async fn run_weekly_snapshot<B>(db: &B, now: DateTime<Utc>) -> Result<SnapshotReport, VendorMetricsError>
where B: VendorManagement + PerformanceHistory {
    let vendors = db.fetch_vendors().await.map_err(VendorMetricsError::database)?;
    info!("📸️ Taking performance snapshots for {} vendors", vendors.len());
    let mut report = SnapshotReport::new(now);
    for vendor in &vendors {
        let snapshot = NewPerformanceSnapshot::for_vendor(vendor, now);
        match db.insert_snapshot(snapshot).await {
            Ok(snapshot) => {
                trace!("📸️ Vendor #{} snapshot #{}: {}", vendor.id, snapshot.id, snapshot.metrics);
                report.snapshots.push(snapshot);
            },
            Err(e) => {
                error!("📸️ Could not store the performance snapshot for vendor #{}: {e}", vendor.id);
                report.failures.push(SnapshotFailure { vendor_id: vendor.id, reason: e.to_string() });
            },
        }
    }
    info!("📸️ Snapshot run complete. {} stored, {} failed", report.success_count(), report.failure_count());
    Ok(report)
}
