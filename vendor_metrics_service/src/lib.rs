//! # Vendor metrics service
//!
//! Hosts the scheduled side of the vendor metrics engine. The service runs a single background worker that takes a
//! snapshot of every vendor's performance metrics once a week and appends it to the performance history.
//!
//! ## Configuration
//! The service is configured via environment variables. See [config](config/index.html) for more information.
pub mod cli;
pub mod config;
pub mod errors;
pub mod schedule;
pub mod service;
pub mod snapshot_worker;
