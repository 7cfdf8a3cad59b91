use chrono::{Duration, TimeZone, Utc};
use mockall::mock;
use serde_json::json;
use sqlx::types::Json;
use thiserror::Error;

use crate::{
    db::traits::{OrderCountFilter, PerformanceHistory, PurchaseOrderManagement, VendorManagement},
    db_types::{
        MetricsUpdate,
        NewPerformanceSnapshot,
        NewPurchaseOrder,
        NewVendor,
        OrderStatusType,
        PerformanceSnapshot,
        PoNumber,
        PurchaseOrder,
        Vendor,
        VendorCode,
        VendorMetrics,
    },
};

#[derive(Debug, Clone, Error)]
pub struct MockErr {
    pub message: String,
}

impl MockErr {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }
}

impl std::fmt::Display for MockErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

mock! {
    pub Store {}
    impl VendorManagement for Store {
        type Error = MockErr;
        async fn insert_vendor(&self, vendor: NewVendor) -> Result<Vendor, MockErr>;
        async fn fetch_vendor(&self, vendor_id: i64) -> Result<Option<Vendor>, MockErr>;
        async fn fetch_vendors(&self) -> Result<Vec<Vendor>, MockErr>;
    }
    impl PurchaseOrderManagement for Store {
        type Error = MockErr;
        async fn insert_order(&self, order: NewPurchaseOrder) -> Result<PurchaseOrder, MockErr>;
        async fn fetch_order_by_id(&self, id: i64) -> Result<Option<PurchaseOrder>, MockErr>;
        async fn count_orders(&self, vendor_id: i64, filter: OrderCountFilter) -> Result<i64, MockErr>;
        async fn sum_ratings(&self, vendor_id: i64) -> Result<f64, MockErr>;
        async fn save_order(&self, order: &PurchaseOrder, metrics: &MetricsUpdate) -> Result<PurchaseOrder, MockErr>;
    }
    impl PerformanceHistory for Store {
        type Error = MockErr;
        async fn insert_snapshot(&self, snapshot: NewPerformanceSnapshot) -> Result<PerformanceSnapshot, MockErr>;
        async fn fetch_snapshots(&self, vendor_id: i64) -> Result<Vec<PerformanceSnapshot>, MockErr>;
    }
}

/// A vendor with zeroed metrics
pub fn vendor(id: i64) -> Vendor {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    Vendor {
        id,
        name: format!("Vendor {id}"),
        contact_details: "orders@example.com".into(),
        address: "1 Warehouse Way".into(),
        vendor_code: VendorCode(format!("V{id:03}")),
        metrics: VendorMetrics::default(),
        created_at: created,
        updated_at: created,
    }
}

/// A pending, unrated, unacknowledged order, issued on 1 March 2024 and promised for 10 days later
pub fn order(id: i64, vendor_id: i64) -> PurchaseOrder {
    let issued = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    PurchaseOrder {
        id,
        po_number: PoNumber(format!("PO{id:04}")),
        vendor_id,
        order_date: issued,
        delivery_date: issued + Duration::days(10),
        items: Json(json!({"widgets": 10})),
        quantity: 10,
        status: OrderStatusType::Pending,
        quality_rating: None,
        issue_date: issued,
        acknowledgment_date: None,
        created_at: issued,
        updated_at: issued,
    }
}
