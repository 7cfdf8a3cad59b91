use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::{new_pool, orders, snapshots, vendors, SqliteDatabaseError};
use crate::{
    db::traits::{
        OrderCountFilter,
        PerformanceHistory,
        PurchaseOrderManagement,
        VendorManagement,
        VendorMetricsDatabase,
    },
    db_types::{
        MetricsUpdate,
        NewPerformanceSnapshot,
        NewPurchaseOrder,
        NewVendor,
        PerformanceSnapshot,
        PurchaseOrder,
        Vendor,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl VendorMetricsDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn close(&mut self) {
        self.pool.close().await;
    }
}

impl VendorManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_vendor(&self, vendor: NewVendor) -> Result<Vendor, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        let vendor = vendors::insert_vendor(vendor, &mut conn).await?;
        debug!("🗃️ Vendor {} has been saved in the DB with id {}", vendor.vendor_code, vendor.id);
        Ok(vendor)
    }

    async fn fetch_vendor(&self, vendor_id: i64) -> Result<Option<Vendor>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        vendors::fetch_vendor(vendor_id, &mut conn).await
    }

    async fn fetch_vendors(&self) -> Result<Vec<Vendor>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        vendors::fetch_vendors(&mut conn).await
    }
}

impl PurchaseOrderManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_order(&self, order: NewPurchaseOrder) -> Result<PurchaseOrder, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let order = orders::insert_order(order, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order {} has been saved in the DB with id {}", order.po_number, order.id);
        Ok(order)
    }

    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<PurchaseOrder>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_by_id(id, &mut conn).await
    }

    async fn count_orders(&self, vendor_id: i64, filter: OrderCountFilter) -> Result<i64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        orders::count_orders(vendor_id, filter, &mut conn).await
    }

    async fn sum_ratings(&self, vendor_id: i64) -> Result<f64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        orders::sum_ratings(vendor_id, &mut conn).await
    }

    /// Takes the adjusted order and its metric writes, and in a single atomic transaction,
    /// * overwrites the stored order,
    /// * applies the metric writes to the owning vendor.
    ///
    /// If either step fails, neither is persisted.
    async fn save_order(&self, order: &PurchaseOrder, metrics: &MetricsUpdate) -> Result<PurchaseOrder, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let saved = orders::update_order(order, &mut tx).await?;
        vendors::update_vendor_metrics(order.vendor_id, *metrics, &mut tx).await?;
        tx.commit().await?;
        trace!("🗃️ Order {} saved along with metrics {metrics:?}", saved.po_number);
        Ok(saved)
    }
}

impl PerformanceHistory for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_snapshot(&self, snapshot: NewPerformanceSnapshot) -> Result<PerformanceSnapshot, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        snapshots::insert_snapshot(snapshot, &mut conn).await
    }

    async fn fetch_snapshots(&self, vendor_id: i64) -> Result<Vec<PerformanceSnapshot>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        snapshots::fetch_snapshots_for_vendor(vendor_id, &mut conn).await
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Brings the schema up to date by running any outstanding migrations.
    pub async fn run_migrations(&self) -> Result<(), SqliteDatabaseError> {
        sqlx::migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
