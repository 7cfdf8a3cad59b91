use std::collections::HashMap;

use cucumber::World;
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};
use vendor_metrics_engine::{
    db_types::{PurchaseOrder, Vendor},
    events::EventProducers,
    PerformanceHistoryApi,
    PurchaseOrderApi,
    SqliteDatabase,
    VendorApi,
    VendorMetricsError,
};

#[derive(Default, Debug, World)]
pub struct VendorMetricsWorld {
    pub system: Option<MetricsSystem>,
    pub vendors: HashMap<String, i64>,
    pub orders: HashMap<String, i64>,
    pub last_error: Option<VendorMetricsError>,
}

#[derive(Debug)]
pub struct MetricsSystem {
    pub db_path: String,
    pub db: SqliteDatabase,
    pub orders: PurchaseOrderApi<SqliteDatabase>,
    pub vendors: VendorApi<SqliteDatabase>,
    pub history: PerformanceHistoryApi<SqliteDatabase>,
}

impl VendorMetricsWorld {
    pub fn system(&self) -> &MetricsSystem {
        self.system.as_ref().expect("System not initialised. Start with 'Given a fresh install'")
    }

    pub fn vendor_id(&self, code: &str) -> i64 {
        *self.vendors.get(code).unwrap_or_else(|| panic!("Vendor {code} was not registered in this scenario"))
    }

    pub fn order_id(&self, po: &str) -> i64 {
        *self.orders.get(po).unwrap_or_else(|| panic!("Order {po} was not created in this scenario"))
    }

    pub async fn vendor(&self, code: &str) -> Vendor {
        let id = self.vendor_id(code);
        self.system().vendors.vendor_by_id(id).await.expect("Error fetching vendor").expect("Vendor does not exist")
    }

    pub async fn order(&self, po: &str) -> PurchaseOrder {
        let id = self.order_id(po);
        self.system().orders.order_by_id(id).await.expect("Error fetching order").expect("Order does not exist")
    }
}

impl MetricsSystem {
    pub async fn new() -> Self {
        let db_path = format!("sqlite://{}/vme_cucumber_{}.db", std::env::temp_dir().display(), rand::random::<u64>());
        Sqlite::create_database(&db_path).await.expect("Error creating database");
        let db = SqliteDatabase::new_with_url(&db_path, 5).await.expect("Error creating connection to database");
        db.run_migrations().await.expect("Error running migrations");
        debug!("Created database: {db_path}");
        let orders = PurchaseOrderApi::new(db.clone(), EventProducers::default());
        let vendors = VendorApi::new(db.clone());
        let history = PerformanceHistoryApi::new(db.clone(), EventProducers::default());
        Self { db_path, db, orders, vendors, history }
    }
}
