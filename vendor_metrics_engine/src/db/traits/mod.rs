//! # Record store contracts
//!
//! This module defines the interface contracts that a database *backend* must satisfy to hold vendor metrics.
//! The metric logic itself never issues queries; it only talks to these traits, so any backend (or a mock, in tests)
//! can stand in for the store.
//!
//! ## Traits
//! * [`VendorManagement`] registers vendors and holds their current aggregate metrics (the metric store).
//! * [`PurchaseOrderManagement`] stores purchase orders and answers the counting and summing queries that the
//!   recalculations need. Saving an order always carries the metric writes that go with it, so that both land in a
//!   single atomic transaction.
//! * [`PerformanceHistory`] is the append-only log of metric snapshots.
//! * [`VendorMetricsDatabase`] is the top-level trait for a backend that provides all of the above.
mod data_objects;
mod performance_history;
mod purchase_order_management;
mod vendor_management;
mod vendor_metrics_database;

pub use data_objects::OrderCountFilter;
pub use performance_history::PerformanceHistory;
pub use purchase_order_management::PurchaseOrderManagement;
pub use vendor_management::VendorManagement;
pub use vendor_metrics_database::VendorMetricsDatabase;
