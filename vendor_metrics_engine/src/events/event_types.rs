use serde::Serialize;

use crate::{
    db_types::{MetricsUpdate, PurchaseOrder},
    snapshot::SnapshotReport,
};

/// Published after an order save that changed at least one of its vendor's metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsUpdatedEvent {
    pub vendor_id: i64,
    /// The order as it was saved
    pub order: PurchaseOrder,
    /// The metric fields that were written
    pub update: MetricsUpdate,
}

impl MetricsUpdatedEvent {
    pub fn new(order: PurchaseOrder, update: MetricsUpdate) -> Self {
        Self { vendor_id: order.vendor_id, order, update }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotCompletedEvent {
    pub report: SnapshotReport,
}

impl SnapshotCompletedEvent {
    pub fn new(report: SnapshotReport) -> Self {
        Self { report }
    }
}
