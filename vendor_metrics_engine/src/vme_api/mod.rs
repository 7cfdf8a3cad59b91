//! # Vendor metrics engine public API
//!
//! The `vme_api` module is the programmatic surface of the engine. Each API takes a database backend that implements
//! the record store traits it needs, so a caller can pick the pieces it wants.
//!
//! * [`purchase_order_api`] creates and updates purchase orders, running the metric recalculations on every update.
//!   This is the only path through which vendor metrics change.
//! * [`vendor_api`] registers vendors and reads their current metrics.
//! * [`performance_history_api`] takes the weekly performance snapshots and reads a vendor's history back.
//!
//! # API usage
//!
//! ```rust,ignore
//! use vendor_metrics_engine::{events::EventProducers, PurchaseOrderApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/vendor_metrics.db", 25).await?;
//! let api = PurchaseOrderApi::new(db, EventProducers::default());
//! let order = api.acknowledge_order(order_id).await?;
//! ```
pub mod errors;
pub mod performance_history_api;
pub mod purchase_order_api;
pub mod vendor_api;
pub mod vendor_locks;
