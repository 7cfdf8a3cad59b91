//! # Metric recalculation
//!
//! Pure functions that derive a vendor's new aggregate metrics from the stored aggregate and a single new data point.
//! Nothing in here touches the database. The [`observer`](crate::observer) gathers the counts and sums these
//! functions need and decides which of them fire.
//!
//! Every result is rounded to two decimal places, which is also the precision stored on the vendor record.
//!
//! All the running averages are incremental, so each function must be applied exactly once per qualifying order
//! transition. Applying one twice for the same transition skews the aggregate and there is no way to undo it.
use chrono::{DateTime, Utc};
use thiserror::Error;

const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecalculationError {
    /// There are no orders to average over. The metric must be left as it is.
    #[error("Cannot recalculate {0}: the vendor has no orders to average over")]
    DivisionByZero(&'static str),
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Was the order delivered on time? The stored delivery date is the promise; the proposed one is the delivery.
pub fn is_on_time(promised: DateTime<Utc>, delivered: DateTime<Utc>) -> bool {
    promised >= delivered
}

/// The new on-time delivery percentage after one more order completes.
///
/// `total_orders` is the number of orders held for the vendor, including the completing order. The number of
/// previously on-time orders is reconstructed from the stored percentage, so the result is only as good as that
/// percentage's two decimals. To keep the rate honest despite that rounding, an on-time completion never lowers the
/// rate and a late one never raises it. The result always lies in `[0, 100]`.
pub fn on_time_delivery_rate(old_rate: f64, total_orders: i64, on_time: bool) -> Result<f64, RecalculationError> {
    if total_orders <= 0 {
        return Err(RecalculationError::DivisionByZero("on-time delivery rate"));
    }
    let total = total_orders as f64;
    let prior_on_time = (old_rate * total / 100.0).round().clamp(0.0, total);
    let delta = if on_time { 1.0 } else { 0.0 };
    let on_time_count = (prior_on_time + delta).min(total);
    let rate = on_time_count / total * 100.0;
    let old_rate = old_rate.clamp(0.0, 100.0);
    let rate = if on_time { rate.max(old_rate) } else { rate.min(old_rate) };
    Ok(round2(rate))
}

/// The new fulfillment percentage when one more order completes.
///
/// `completed_orders` is the number of the vendor's orders that were already `completed` before this transition; the
/// transitioning order is added here.
pub fn fulfillment_rate(completed_orders: i64, total_orders: i64) -> Result<f64, RecalculationError> {
    if total_orders <= 0 {
        return Err(RecalculationError::DivisionByZero("fulfillment rate"));
    }
    let completed = (completed_orders + 1) as f64;
    let rate = (completed / total_orders as f64 * 100.0).clamp(0.0, 100.0);
    Ok(round2(rate))
}

/// The new quality rating average: `(rating_sum + new_rating) / (rated_orders + 1)`.
///
/// `rating_sum` and `rated_orders` are taken over every stored order for the vendor that carries a rating. If the order
/// being saved already had a rating stored, that rating is in the sum as well as in `new_rating`.
pub fn quality_rating_avg(rating_sum: f64, rated_orders: i64, new_rating: f64) -> f64 {
    let count = (rated_orders.max(0) + 1) as f64;
    round2((rating_sum + new_rating) / count)
}

/// The time, in fractional days, between issuing an order and the vendor acknowledging it. Acknowledgments that
/// precede the issue date count as an immediate response.
pub fn response_time_days(issue_date: DateTime<Utc>, acknowledgment_date: DateTime<Utc>) -> f64 {
    let elapsed = acknowledgment_date - issue_date;
    let seconds = elapsed.num_milliseconds() as f64 / 1000.0;
    (seconds / SECONDS_PER_DAY).max(0.0)
}

/// The new average response time: `(old_avg * acknowledged + interval) / (acknowledged + 1)`, where `acknowledged` is
/// the number of the vendor's orders that were already acknowledged.
pub fn average_response_time(old_avg: f64, acknowledged_orders: i64, interval_days: f64) -> f64 {
    let acknowledged = acknowledged_orders.max(0) as f64;
    round2((old_avg * acknowledged + interval_days) / (acknowledged + 1.0))
}
