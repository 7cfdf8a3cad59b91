//! The background task that takes the weekly performance snapshots.
//!
//! One task runs the snapshots one after the other, so runs never overlap. Stopping the worker lets a run that is in
//! progress finish.
use chrono::{DateTime, Utc};
use log::*;
use tokio::{sync::oneshot, task::JoinHandle};
use vendor_metrics_engine::{events::EventProducers, snapshot::SnapshotReport, PerformanceHistoryApi, SqliteDatabase};

use crate::{errors::ServiceError, schedule::WeeklySchedule};

pub struct SnapshotWorker {
    api: PerformanceHistoryApi<SqliteDatabase>,
    schedule: WeeklySchedule,
}

impl SnapshotWorker {
    pub fn new(db: SqliteDatabase, producers: EventProducers, schedule: WeeklySchedule) -> Self {
        Self { api: PerformanceHistoryApi::new(db, producers), schedule }
    }

    /// Takes one round of snapshots, dated `now`.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<SnapshotReport, ServiceError> {
        info!("🕰️ Running the weekly performance snapshot job");
        let report = self.api.run_weekly_snapshot(now).await?;
        if report.is_complete() {
            info!("🕰️ {} vendor snapshots taken", report.success_count());
        } else {
            warn!(
                "🕰️ {} vendor snapshots taken, {} failed. Failed vendors: {:?}",
                report.success_count(),
                report.failure_count(),
                report.failures.iter().map(|f| f.vendor_id).collect::<Vec<_>>()
            );
        }
        Ok(report)
    }

    /// Starts the worker on its own task. It runs until [`SnapshotWorkerHandle::stop`] is called or the handle is
    /// dropped.
    pub fn start(self) -> SnapshotWorkerHandle {
        let (shutdown, mut shutdown_signal) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            info!("🕰️ Performance snapshot worker started. Schedule: {} UTC", self.schedule);
            loop {
                let now = Utc::now();
                let next = self.schedule.next_after(now);
                let wait = (next - now).to_std().unwrap_or_default();
                debug!("🕰️ Next performance snapshot at {next}");
                tokio::select! {
                    _ = &mut shutdown_signal => break,
                    _ = tokio::time::sleep(wait) => {
                        if let Err(e) = self.run_once(Utc::now()).await {
                            error!("🕰️ Error running the weekly performance snapshot job: {e}");
                        }
                    },
                }
            }
            info!("🕰️ Performance snapshot worker stopped");
        });
        SnapshotWorkerHandle { shutdown, task }
    }
}

pub struct SnapshotWorkerHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SnapshotWorkerHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signals the worker to stop and waits for it to wind down.
    pub async fn stop(self) -> Result<(), ServiceError> {
        debug!("🕰️ Stopping the performance snapshot worker");
        // The worker may already have exited, in which case there is no one to tell
        let _ = self.shutdown.send(());
        self.task.await.map_err(|e| ServiceError::BackendError(format!("Snapshot worker did not shut down cleanly. {e}")))
    }
}
