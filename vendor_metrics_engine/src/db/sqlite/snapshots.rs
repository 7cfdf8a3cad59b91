use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewPerformanceSnapshot, PerformanceSnapshot},
};

const SNAPSHOT_COLUMNS: &str =
    "id, vendor_id, date, on_time_delivery_rate, quality_rating_avg, average_response_time, fulfillment_rate";

pub async fn insert_snapshot(
    snapshot: NewPerformanceSnapshot,
    conn: &mut SqliteConnection,
) -> Result<PerformanceSnapshot, SqliteDatabaseError> {
    let sql = format!(
        "INSERT INTO performance_snapshots (vendor_id, date, on_time_delivery_rate, quality_rating_avg, \
         average_response_time, fulfillment_rate) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {SNAPSHOT_COLUMNS}"
    );
    let metrics = snapshot.metrics;
    let snapshot = sqlx::query_as::<_, PerformanceSnapshot>(&sql)
        .bind(snapshot.vendor_id)
        .bind(snapshot.date)
        .bind(metrics.on_time_delivery_rate)
        .bind(metrics.quality_rating_avg)
        .bind(metrics.average_response_time)
        .bind(metrics.fulfillment_rate)
        .fetch_one(conn)
        .await?;
    trace!("🗃️ Snapshot #{} stored for vendor #{}", snapshot.id, snapshot.vendor_id);
    Ok(snapshot)
}

/// Fetches the vendor's snapshots, oldest first
pub async fn fetch_snapshots_for_vendor(
    vendor_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<PerformanceSnapshot>, SqliteDatabaseError> {
    let sql = format!("SELECT {SNAPSHOT_COLUMNS} FROM performance_snapshots WHERE vendor_id = $1 ORDER BY date, id");
    let snapshots = sqlx::query_as::<_, PerformanceSnapshot>(&sql).bind(vendor_id).fetch_all(conn).await?;
    Ok(snapshots)
}
