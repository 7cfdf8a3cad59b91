use chrono::Utc;
use log::{debug, trace};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{MetricsUpdate, NewVendor, Vendor, VendorCode},
};

const VENDOR_COLUMNS: &str = "id, name, contact_details, address, vendor_code, on_time_delivery_rate, \
                              quality_rating_avg, average_response_time, fulfillment_rate, created_at, updated_at";

/// Inserts a new vendor. All four metrics start at zero. Returns an error if the vendor code is already taken.
pub async fn insert_vendor(vendor: NewVendor, conn: &mut SqliteConnection) -> Result<Vendor, SqliteDatabaseError> {
    if let Some(id) = vendor_exists(&vendor.vendor_code, &mut *conn).await? {
        debug!("🗃️ Vendor {} is already registered with id {id}", vendor.vendor_code);
        return Err(SqliteDatabaseError::DuplicateVendor(vendor.vendor_code.to_string()));
    }
    let now = Utc::now();
    let sql = format!(
        "INSERT INTO vendors (name, contact_details, address, vendor_code, created_at, updated_at) VALUES ($1, $2, \
         $3, $4, $5, $6) RETURNING {VENDOR_COLUMNS}"
    );
    let vendor = sqlx::query_as::<_, Vendor>(&sql)
        .bind(vendor.name)
        .bind(vendor.contact_details)
        .bind(vendor.address)
        .bind(vendor.vendor_code)
        .bind(now)
        .bind(now)
        .fetch_one(conn)
        .await?;
    Ok(vendor)
}

pub async fn fetch_vendor(vendor_id: i64, conn: &mut SqliteConnection) -> Result<Option<Vendor>, SqliteDatabaseError> {
    let sql = format!("SELECT {VENDOR_COLUMNS} FROM vendors WHERE id = $1");
    let vendor = sqlx::query_as::<_, Vendor>(&sql).bind(vendor_id).fetch_optional(conn).await?;
    Ok(vendor)
}

pub async fn fetch_vendors(conn: &mut SqliteConnection) -> Result<Vec<Vendor>, SqliteDatabaseError> {
    let sql = format!("SELECT {VENDOR_COLUMNS} FROM vendors ORDER BY id ASC");
    let vendors = sqlx::query_as::<_, Vendor>(&sql).fetch_all(conn).await?;
    trace!("🗃️ Fetched {} vendors", vendors.len());
    Ok(vendors)
}

/// Checks whether a vendor with the given code exists. If it does, the vendor's `id` is returned.
pub async fn vendor_exists(code: &VendorCode, conn: &mut SqliteConnection) -> Result<Option<i64>, SqliteDatabaseError> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM vendors WHERE vendor_code = $1")
        .bind(code.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(id)
}

/// Writes the fields that are set in `update` onto the vendor record. This is not atomic. Embed the call in a
/// transaction if it needs to land together with other writes.
pub(crate) async fn update_vendor_metrics(
    vendor_id: i64,
    update: MetricsUpdate,
    conn: &mut SqliteConnection,
) -> Result<(), SqliteDatabaseError> {
    if update.is_empty() {
        debug!("🗃️ No metrics to update for vendor #{vendor_id}. Update request skipped.");
        return Ok(());
    }
    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE vendors SET updated_at = ");
    builder.push_bind(Utc::now());
    if let Some(rate) = update.on_time_delivery_rate {
        builder.push(", on_time_delivery_rate = ");
        builder.push_bind(rate);
    }
    if let Some(avg) = update.quality_rating_avg {
        builder.push(", quality_rating_avg = ");
        builder.push_bind(avg);
    }
    if let Some(days) = update.average_response_time {
        builder.push(", average_response_time = ");
        builder.push_bind(days);
    }
    if let Some(rate) = update.fulfillment_rate {
        builder.push(", fulfillment_rate = ");
        builder.push_bind(rate);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(vendor_id);
    trace!("🗃️ Executing query: {}", builder.sql());
    let res = builder.build().execute(conn).await?;
    if res.rows_affected() == 0 {
        return Err(SqliteDatabaseError::VendorNotFound(vendor_id));
    }
    trace!("🗃️ Metrics for vendor #{vendor_id} updated: {update:?}");
    Ok(())
}
