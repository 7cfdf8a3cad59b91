//! Vendor Metrics Engine
//!
//! The engine keeps a running scorecard for every vendor: on-time delivery rate, quality rating average, average
//! response time and fulfillment rate. The scorecard is updated incrementally, as purchase orders move through their
//! lifecycle, and is copied into an append-only performance history once a week.
//!
//! The library is divided into these sections:
//! 1. Record storage ([`mod@db`]). The [`db::traits`] define what a backend must provide; SQLite is the supported
//!    backend. Callers should use the public API rather than the database directly, with the exception of the data
//!    types in [`db_types`].
//! 2. The recalculation logic. [`metrics`] holds the pure formulas, [`observer`] decides which of them an order change
//!    triggers, and [`snapshot`] copies the scorecards into the history.
//! 3. The public API ([`mod@vme_api`]): [`PurchaseOrderApi`], [`VendorApi`] and [`PerformanceHistoryApi`].
//!
//! The engine emits events when metrics change and when a snapshot run finishes. See [`events`] for how to hook into
//! them.
pub mod db;

pub mod db_types;
pub mod events;
pub mod metrics;
pub mod observer;
pub mod snapshot;
pub mod vme_api;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{SqliteDatabase, SqliteDatabaseError};
pub use db::traits::{
    OrderCountFilter,
    PerformanceHistory,
    PurchaseOrderManagement,
    VendorManagement,
    VendorMetricsDatabase,
};
pub use vme_api::{
    errors::VendorMetricsError,
    performance_history_api::PerformanceHistoryApi,
    purchase_order_api::PurchaseOrderApi,
    vendor_api::VendorApi,
    vendor_locks::VendorLocks,
};
