use chrono::Duration;
use cucumber::{then, when};
use vendor_metrics_engine::{db_types::OrderStatusType, VendorMetricsError};

use crate::cucumber::VendorMetricsWorld;

async fn complete(world: &mut VendorMetricsWorld, po: &str, days_late: i64, rating: Option<f64>) {
    let mut order = world.order(po).await;
    order.status = OrderStatusType::Completed;
    order.delivery_date += Duration::days(days_late);
    order.quality_rating = rating;
    world.system().orders.update_order(order).await.expect("Error completing order");
}

#[when(expr = "order {word} is completed on time")]
async fn completed_on_time(world: &mut VendorMetricsWorld, po: String) {
    complete(world, &po, 0, None).await;
}

#[when(expr = "order {word} is completed {int} days late")]
async fn completed_late(world: &mut VendorMetricsWorld, po: String, days: i64) {
    complete(world, &po, days, None).await;
}

#[when(expr = "order {word} is completed with a rating of {float}")]
async fn completed_with_rating(world: &mut VendorMetricsWorld, po: String, rating: f64) {
    complete(world, &po, 0, Some(rating)).await;
}

#[when(expr = "order {word} is acknowledged {int} hours after issue")]
async fn acknowledged(world: &mut VendorMetricsWorld, po: String, hours: i64) {
    let mut order = world.order(&po).await;
    order.acknowledgment_date = Some(order.issue_date + Duration::hours(hours));
    world.system().orders.update_order(order).await.expect("Error acknowledging order");
}

#[when(expr = "order {word} is moved back to {word}")]
async fn reopen(world: &mut VendorMetricsWorld, po: String, status: String) {
    let mut order = world.order(&po).await;
    order.status = status.parse().expect("Not a valid order status");
    world.last_error = world.system().orders.update_order(order).await.err();
}

#[when("the weekly snapshot runs")]
async fn weekly_snapshot(world: &mut VendorMetricsWorld) {
    let report = world.system().history.run_weekly_snapshot(chrono::Utc::now()).await.expect("Snapshot run failed");
    assert!(report.is_complete(), "Some snapshots failed: {:?}", report.failures);
}

#[then(expr = "vendor '{word}' has an on-time delivery rate of {float}")]
async fn on_time_rate(world: &mut VendorMetricsWorld, code: String, rate: f64) {
    let vendor = world.vendor(&code).await;
    assert_eq!(vendor.metrics.on_time_delivery_rate, rate, "On-time delivery rate is incorrect");
}

#[then(expr = "vendor '{word}' has a fulfillment rate of {float}")]
async fn fulfillment_rate(world: &mut VendorMetricsWorld, code: String, rate: f64) {
    let vendor = world.vendor(&code).await;
    assert_eq!(vendor.metrics.fulfillment_rate, rate, "Fulfillment rate is incorrect");
}

#[then(expr = "vendor '{word}' has a quality rating average of {float}")]
async fn quality_rating(world: &mut VendorMetricsWorld, code: String, avg: f64) {
    let vendor = world.vendor(&code).await;
    assert_eq!(vendor.metrics.quality_rating_avg, avg, "Quality rating average is incorrect");
}

#[then(expr = "vendor '{word}' has an average response time of {float} days")]
async fn response_time(world: &mut VendorMetricsWorld, code: String, days: f64) {
    let vendor = world.vendor(&code).await;
    assert_eq!(vendor.metrics.average_response_time, days, "Average response time is incorrect");
}

#[then("the change is rejected")]
async fn change_rejected(world: &mut VendorMetricsWorld) {
    match world.last_error.take() {
        Some(VendorMetricsError::ValidationViolation(reason)) => log::info!("Rejected as expected: {reason}"),
        other => panic!("Expected a validation error, got {other:?}"),
    }
}

#[then(expr = "order {word} has status {word}")]
async fn order_status(world: &mut VendorMetricsWorld, po: String, status: String) {
    let order = world.order(&po).await;
    assert_eq!(order.status.to_string(), status);
}

#[then(expr = "vendor '{word}' has {int} performance snapshots")]
async fn snapshot_count(world: &mut VendorMetricsWorld, code: String, count: usize) {
    let id = world.vendor_id(&code);
    let history = world.system().history.history_for_vendor(id).await.expect("Error fetching history");
    assert_eq!(history.len(), count);
}

#[then(expr = "the latest snapshot for vendor '{word}' has a fulfillment rate of {float}")]
async fn latest_snapshot(world: &mut VendorMetricsWorld, code: String, rate: f64) {
    let id = world.vendor_id(&code);
    let history = world.system().history.history_for_vendor(id).await.expect("Error fetching history");
    let latest = history.last().expect("No snapshots");
    assert_eq!(latest.metrics.fulfillment_rate, rate);
}
