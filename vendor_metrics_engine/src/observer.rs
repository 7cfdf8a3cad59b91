//! # Order change observer
//!
//! [`on_order_pre_save`] is the hook that the calling layer invokes with the stored state of a purchase order and the
//! state it is about to be saved with. It validates the transition, works out which metric recalculations the change
//! triggers, and hands back the adjusted order together with the metric writes. It never writes to the store itself.
//! Persisting the order and the metrics in one transaction, while holding the vendor's lock, is the caller's job (see
//! [`PurchaseOrderApi::update_order`](crate::PurchaseOrderApi::update_order)).
//!
//! Three independent triggers are checked, in this order, and any combination of them may fire on one update:
//!
//! | Trigger         | Fires when                                                          | Writes                       |
//! |-----------------|---------------------------------------------------------------------|------------------------------|
//! | Quality rating  | the proposed order is `completed` and carries a rating              | `quality_rating_avg`         |
//! | Completion      | the order moves into `completed`                                    | on-time and fulfillment rate |
//! | Acknowledgment  | the order gets its first acknowledgment date                        | `average_response_time`      |
//!
//! Completion also stamps the order's `delivery_date` with the completion time.
//!
//! All counts and sums are read from the store *before* the order is saved, so they reflect the stored state of the
//! order rather than the proposed one.
use chrono::{DateTime, Utc};
use log::*;

use crate::{
    db::traits::{OrderCountFilter, PurchaseOrderManagement, VendorManagement},
    db_types::{MetricsUpdate, OrderStatusType, PoNumber, PurchaseOrder},
    metrics,
    vme_api::errors::VendorMetricsError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricTrigger {
    QualityRating,
    Completion,
    Acknowledgment,
}

/// The result of running the pre-save hook: the order as it must be saved, and the metric writes that go with it.
#[derive(Debug, Clone, PartialEq)]
pub struct PreSaveOutcome {
    pub order: PurchaseOrder,
    pub metrics: MetricsUpdate,
    pub triggers: Vec<MetricTrigger>,
}

impl PreSaveOutcome {
    fn unchanged(order: PurchaseOrder) -> Self {
        Self { order, metrics: MetricsUpdate::default(), triggers: Vec::new() }
    }

    pub fn fired(&self, trigger: MetricTrigger) -> bool {
        self.triggers.contains(&trigger)
    }
}

/// Rejects changes that the purchase order lifecycle does not allow.
pub fn validate_order_change(old: &PurchaseOrder, new: &PurchaseOrder) -> Result<(), VendorMetricsError> {
    if old.vendor_id != new.vendor_id {
        return Err(VendorMetricsError::invalid(format!(
            "Order {} belongs to vendor #{} and cannot be moved to vendor #{}",
            old.po_number, old.vendor_id, new.vendor_id
        )));
    }
    if old.is_completed() && !new.is_completed() {
        return Err(VendorMetricsError::invalid(format!(
            "Order {} is completed and cannot be moved to {}",
            old.po_number, new.status
        )));
    }
    validate_quantity(&new.po_number, new.quantity)
}

/// Orders must be for a positive quantity.
pub fn validate_quantity(po_number: &PoNumber, quantity: i64) -> Result<(), VendorMetricsError> {
    if quantity <= 0 {
        return Err(VendorMetricsError::invalid(format!(
            "Quantity must be more than 0. Order {po_number} has {quantity}"
        )));
    }
    Ok(())
}

/// The pre-persistence hook for purchase orders.
///
/// * `old` is the stored state of the order, or `None` if the order is being created. New orders never trigger
///   recalculation and are returned untouched.
/// * `new` is the proposed state.
/// * `now` is recorded as the delivery date when the order completes.
///
/// ## Failure modes
/// * `ValidationViolation` if a completed order would leave the `completed` state, the order would move to another
///   vendor, or the quantity is not positive.
/// * `VendorNotFound` if the vendor that owns the proposed order does not exist.
/// * `DatabaseError` if any of the counting queries fail.
///
/// A recalculation that would divide by zero is skipped with a warning; the other recalculations still apply.
pub async fn on_order_pre_save<B>(
    db: &B,
    old: Option<&PurchaseOrder>,
    new: PurchaseOrder,
    now: DateTime<Utc>,
) -> Result<PreSaveOutcome, VendorMetricsError>
where
    B: VendorManagement + PurchaseOrderManagement,
{
    let Some(old) = old else {
        trace!("📊️ Order {} is new. Nothing to recalculate.", new.po_number);
        return Ok(PreSaveOutcome::unchanged(new));
    };
    validate_order_change(old, &new)?;
    let mut order = new;
    if let Some(acknowledged) = old.acknowledgment_date {
        if order.acknowledgment_date != Some(acknowledged) {
            warn!(
                "📊️ Order {} was already acknowledged at {acknowledged}. The acknowledgment date cannot be changed.",
                order.po_number
            );
            order.acknowledgment_date = Some(acknowledged);
        }
    }
    let vendor_id = order.vendor_id;
    let vendor = db
        .fetch_vendor(vendor_id)
        .await
        .map_err(VendorMetricsError::database)?
        .ok_or(VendorMetricsError::VendorNotFound(vendor_id))?;
    let current = vendor.metrics;
    let mut update = MetricsUpdate::default();
    let mut triggers = Vec::with_capacity(3);

    if let (Some(rating), true) = (order.quality_rating, order.is_completed()) {
        let rated = count(db, vendor_id, OrderCountFilter::default().rated()).await?;
        let rating_sum = db.sum_ratings(vendor_id).await.map_err(VendorMetricsError::database)?;
        let avg = metrics::quality_rating_avg(rating_sum, rated, rating);
        debug!("📊️ Order {} rated {rating}. Vendor #{vendor_id} quality average is now {avg}", order.po_number);
        update = update.with_quality_rating_avg(avg);
        triggers.push(MetricTrigger::QualityRating);
    }

    if !old.is_completed() && order.is_completed() {
        let total = count(db, vendor_id, OrderCountFilter::default()).await?;
        let on_time = metrics::is_on_time(old.delivery_date, order.delivery_date);
        match metrics::on_time_delivery_rate(current.on_time_delivery_rate, total, on_time) {
            Ok(rate) => update = update.with_on_time_delivery_rate(rate),
            Err(e) => warn!("📊️ {e}. The on-time delivery rate for vendor #{vendor_id} is unchanged."),
        }
        let completed =
            count(db, vendor_id, OrderCountFilter::default().with_status(OrderStatusType::Completed)).await?;
        match metrics::fulfillment_rate(completed, total) {
            Ok(rate) => update = update.with_fulfillment_rate(rate),
            Err(e) => warn!("📊️ {e}. The fulfillment rate for vendor #{vendor_id} is unchanged."),
        }
        debug!(
            "📊️ Order {} completed ({}). Vendor #{vendor_id} rates updated: {update:?}",
            order.po_number,
            if on_time { "on time" } else { "late" }
        );
        order.delivery_date = now;
        triggers.push(MetricTrigger::Completion);
    }

    if let (None, Some(acknowledged)) = (old.acknowledgment_date, order.acknowledgment_date) {
        let prior = count(db, vendor_id, OrderCountFilter::default().acknowledged()).await?;
        let interval = metrics::response_time_days(order.issue_date, acknowledged);
        let avg = metrics::average_response_time(current.average_response_time, prior, interval);
        debug!(
            "📊️ Order {} acknowledged after {interval:.2} days. Vendor #{vendor_id} average response time is now {avg}",
            order.po_number
        );
        update = update.with_average_response_time(avg);
        triggers.push(MetricTrigger::Acknowledgment);
    }

    if !update.is_empty() {
        trace!("📊️ Vendor #{vendor_id} metrics after order {}: {}", order.po_number, update.apply_to(&current));
    }
    Ok(PreSaveOutcome { order, metrics: update, triggers })
}

async fn count<B: PurchaseOrderManagement>(
    db: &B,
    vendor_id: i64,
    filter: OrderCountFilter,
) -> Result<i64, VendorMetricsError> {
    db.count_orders(vendor_id, filter).await.map_err(VendorMetricsError::database)
}
