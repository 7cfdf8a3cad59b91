use log::*;
use vendor_metrics_engine::{
    events::{BoxedFuture, EventHandlers, EventHooks},
    SqliteDatabase,
    VendorMetricsDatabase,
};

use crate::{config::ServiceConfig, errors::ServiceError, snapshot_worker::SnapshotWorker};

/// Connects to the database, starts the snapshot worker, and runs until Ctrl-C is received.
pub async fn run_service(config: ServiceConfig) -> Result<(), ServiceError> {
    let mut db = SqliteDatabase::new_with_url(&config.database_url, config.max_connections)
        .await
        .map_err(|e| ServiceError::InitializeError(e.to_string()))?;
    if config.run_migrations {
        db.run_migrations().await.map_err(|e| ServiceError::InitializeError(e.to_string()))?;
    } else {
        info!("🚀️ Skipping database migrations");
    }
    let handlers = EventHandlers::new(16, default_hooks());
    let producers = handlers.producers();
    handlers.start_handlers().await;

    let worker = SnapshotWorker::new(db.clone(), producers, config.snapshot_schedule).start();
    info!("🚀️ Vendor metrics service is running. Press Ctrl-C to stop.");
    let signal = tokio::signal::ctrl_c().await;
    if let Err(e) = signal {
        error!("🚀️ Could not listen for the shutdown signal. {e}");
    }
    info!("🚀️ Shutting down");
    let result = worker.stop().await;
    db.close().await;
    result
}

fn default_hooks() -> EventHooks {
    let mut hooks = EventHooks::default();
    hooks.on_snapshot_completed(|ev| {
        Box::pin(async move {
            let report = ev.report;
            info!(
                "📬️ Snapshot run of {} complete. {} stored, {} failed",
                report.taken_at,
                report.success_count(),
                report.failure_count()
            );
        }) as BoxedFuture
    });
    hooks
}
