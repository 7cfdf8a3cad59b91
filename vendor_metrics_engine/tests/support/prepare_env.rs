#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};
use vendor_metrics_engine::{
    db_types::{NewPurchaseOrder, NewVendor, PoNumber, PurchaseOrder, Vendor, VendorCode},
    events::EventProducers,
    PurchaseOrderApi,
    SqliteDatabase,
    VendorApi,
    VendorMetricsDatabase,
};

pub fn random_db_path() -> String {
    format!("sqlite://{}/vme_it_{}.db", std::env::temp_dir().display(), rand::random::<u64>())
}

/// A migrated, empty database in the temp directory.
pub async fn prepare_test_env() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let url = random_db_path();
    Sqlite::create_database(&url).await.expect("Error creating database");
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error connecting to database");
    db.run_migrations().await.expect("Error running migrations");
    debug!("🚀️ Test database ready at {url}");
    db
}

pub async fn tear_down(mut db: SqliteDatabase) {
    let url = db.url().to_string();
    db.close().await;
    if let Err(e) = Sqlite::drop_database(&url).await {
        warn!("🚀️ Could not remove {url}: {e}");
    }
}

pub async fn new_vendor(db: &SqliteDatabase, code: &str) -> Vendor {
    VendorApi::new(db.clone())
        .register_vendor(NewVendor::new(VendorCode::from(code), format!("{code} Supplies")))
        .await
        .expect("Error registering vendor")
}

/// A pending order issued at `issued`, promised for `promised_in` later.
pub async fn new_order(
    api: &PurchaseOrderApi<SqliteDatabase>,
    po: &str,
    vendor_id: i64,
    issued: DateTime<Utc>,
    promised_in: Duration,
) -> PurchaseOrder {
    let order = NewPurchaseOrder::new(PoNumber::from(po), vendor_id, issued + promised_in, 10)
        .with_order_date(issued)
        .with_issue_date(issued);
    api.create_order(order).await.expect("Error creating order")
}

pub fn order_api(db: &SqliteDatabase) -> PurchaseOrderApi<SqliteDatabase> {
    PurchaseOrderApi::new(db.clone(), EventProducers::default())
}
