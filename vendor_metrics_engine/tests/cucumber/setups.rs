use chrono::{Duration, Utc};
use cucumber::given;
use vendor_metrics_engine::db_types::{NewPurchaseOrder, NewVendor, PoNumber, VendorCode};

use crate::cucumber::{world::MetricsSystem, VendorMetricsWorld};

#[given("a fresh install")]
async fn fresh_database(world: &mut VendorMetricsWorld) {
    let system = MetricsSystem::new().await;
    world.system = Some(system);
}

#[given(expr = "vendor '{word}' is registered")]
async fn register_vendor(world: &mut VendorMetricsWorld, code: String) {
    let vendor = NewVendor::new(VendorCode::from(code.as_str()), format!("{code} Ltd"))
        .with_contact_details(format!("orders@{}.example", code.to_lowercase()))
        .with_address("42 Dock Road");
    let vendor = world.system().vendors.register_vendor(vendor).await.expect("Error registering vendor");
    world.vendors.insert(code, vendor.id);
}

/// Orders are issued five days ago, so acknowledgments and completions always come after the issue date
#[given(expr = "vendor '{word}' has an open order {word} promised in {int} days")]
async fn open_order(world: &mut VendorMetricsWorld, code: String, po: String, days: i64) {
    let vendor_id = world.vendor_id(&code);
    let issued = Utc::now() - Duration::days(5);
    let order = NewPurchaseOrder::new(PoNumber::from(po.as_str()), vendor_id, issued + Duration::days(days), 10)
        .with_order_date(issued)
        .with_issue_date(issued)
        .with_items(serde_json::json!({"sku": "BOLT-M8", "count": 10}));
    let order = world.system().orders.create_order(order).await.expect("Error creating order");
    world.orders.insert(po, order.id);
}
