use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct ConversionError(String);

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusType {
    /// The order has been placed with the vendor and is awaiting delivery.
    Pending,
    /// The order has been delivered. This is a terminal state.
    Completed,
    /// The order was called off before delivery.
    Canceled,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "pending"),
            OrderStatusType::Completed => write!(f, "completed"),
            OrderStatusType::Canceled => write!(f, "canceled"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

impl From<String> for OrderStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to pending");
            OrderStatusType::Pending
        })
    }
}

//--------------------------------------        PoNumber        --------------------------------------------------------
/// The externally assigned, unique purchase order number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct PoNumber(pub String);

impl FromStr for PoNumber {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for PoNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PoNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for PoNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl PoNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------       VendorCode       --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct VendorCode(pub String);

impl From<String> for VendorCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VendorCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for VendorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl VendorCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------     VendorMetrics      --------------------------------------------------------
/// The four aggregate performance figures held on every vendor record, and copied into each
/// [`PerformanceSnapshot`].
#[derive(Debug, Clone, Copy, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct VendorMetrics {
    /// Percentage (0-100) of completed orders that were delivered on time
    pub on_time_delivery_rate: f64,
    /// Mean of the quality ratings submitted for completed orders
    pub quality_rating_avg: f64,
    /// Mean number of days between issuing an order and the vendor acknowledging it
    pub average_response_time: f64,
    /// Percentage (0-100) of all orders that reached `completed`
    pub fulfillment_rate: f64,
}

impl Display for VendorMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "on-time: {:.2}%, quality: {:.2}, response: {:.2} days, fulfillment: {:.2}%",
            self.on_time_delivery_rate, self.quality_rating_avg, self.average_response_time, self.fulfillment_rate
        )
    }
}

//--------------------------------------     MetricsUpdate      --------------------------------------------------------
/// A set of metric writes for a single vendor. Only the fields that are `Some` are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsUpdate {
    pub on_time_delivery_rate: Option<f64>,
    pub quality_rating_avg: Option<f64>,
    pub average_response_time: Option<f64>,
    pub fulfillment_rate: Option<f64>,
}

impl MetricsUpdate {
    pub fn with_on_time_delivery_rate(mut self, rate: f64) -> Self {
        self.on_time_delivery_rate = Some(rate);
        self
    }

    pub fn with_quality_rating_avg(mut self, avg: f64) -> Self {
        self.quality_rating_avg = Some(avg);
        self
    }

    pub fn with_average_response_time(mut self, days: f64) -> Self {
        self.average_response_time = Some(days);
        self
    }

    pub fn with_fulfillment_rate(mut self, rate: f64) -> Self {
        self.fulfillment_rate = Some(rate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.on_time_delivery_rate.is_none()
            && self.quality_rating_avg.is_none()
            && self.average_response_time.is_none()
            && self.fulfillment_rate.is_none()
    }

    /// Returns a copy of `metrics` with this update applied.
    pub fn apply_to(&self, metrics: &VendorMetrics) -> VendorMetrics {
        VendorMetrics {
            on_time_delivery_rate: self.on_time_delivery_rate.unwrap_or(metrics.on_time_delivery_rate),
            quality_rating_avg: self.quality_rating_avg.unwrap_or(metrics.quality_rating_avg),
            average_response_time: self.average_response_time.unwrap_or(metrics.average_response_time),
            fulfillment_rate: self.fulfillment_rate.unwrap_or(metrics.fulfillment_rate),
        }
    }
}

//--------------------------------------         Vendor         --------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    pub contact_details: String,
    pub address: String,
    pub vendor_code: VendorCode,
    #[sqlx(flatten)]
    pub metrics: VendorMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       NewVendor        --------------------------------------------------------
/// A vendor registration. Metrics are not part of the registration; every vendor starts with all four at zero.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVendor {
    pub name: String,
    pub contact_details: String,
    pub address: String,
    pub vendor_code: VendorCode,
}

impl NewVendor {
    pub fn new<S: Into<String>>(vendor_code: VendorCode, name: S) -> Self {
        Self { name: name.into(), contact_details: String::default(), address: String::default(), vendor_code }
    }

    pub fn with_contact_details<S: Into<String>>(mut self, contact_details: S) -> Self {
        self.contact_details = contact_details.into();
        self
    }

    pub fn with_address<S: Into<String>>(mut self, address: S) -> Self {
        self.address = address.into();
        self
    }
}

//--------------------------------------     PurchaseOrder      --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PurchaseOrder {
    pub id: i64,
    pub po_number: PoNumber,
    pub vendor_id: i64,
    pub order_date: DateTime<Utc>,
    /// The promised delivery date while the order is open; the actual completion time once it is `completed`.
    pub delivery_date: DateTime<Utc>,
    pub items: Json<Value>,
    pub quantity: i64,
    pub status: OrderStatusType,
    pub quality_rating: Option<f64>,
    pub issue_date: DateTime<Utc>,
    /// Set exactly once, when the vendor acknowledges the order
    pub acknowledgment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PurchaseOrder {
    pub fn is_completed(&self) -> bool {
        self.status == OrderStatusType::Completed
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledgment_date.is_some()
    }
}

//--------------------------------------    NewPurchaseOrder    --------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct NewPurchaseOrder {
    pub po_number: PoNumber,
    pub vendor_id: i64,
    /// The time the order was placed
    pub order_date: DateTime<Utc>,
    /// The promised delivery date
    pub delivery_date: DateTime<Utc>,
    pub items: Value,
    pub quantity: i64,
    pub status: OrderStatusType,
    pub quality_rating: Option<f64>,
    /// The time the order was issued to the vendor
    pub issue_date: DateTime<Utc>,
}

impl NewPurchaseOrder {
    pub fn new(po_number: PoNumber, vendor_id: i64, delivery_date: DateTime<Utc>, quantity: i64) -> Self {
        let now = Utc::now();
        Self {
            po_number,
            vendor_id,
            order_date: now,
            delivery_date,
            items: Value::Object(Default::default()),
            quantity,
            status: OrderStatusType::Pending,
            quality_rating: None,
            issue_date: now,
        }
    }

    pub fn with_items(mut self, items: Value) -> Self {
        self.items = items;
        self
    }

    pub fn with_order_date(mut self, order_date: DateTime<Utc>) -> Self {
        self.order_date = order_date;
        self
    }

    pub fn with_issue_date(mut self, issue_date: DateTime<Utc>) -> Self {
        self.issue_date = issue_date;
        self
    }

    pub fn with_status(mut self, status: OrderStatusType) -> Self {
        self.status = status;
        self
    }
}

//--------------------------------------  PerformanceSnapshot   --------------------------------------------------------
/// An immutable, point-in-time copy of a vendor's metrics.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PerformanceSnapshot {
    pub id: i64,
    pub vendor_id: i64,
    pub date: DateTime<Utc>,
    #[sqlx(flatten)]
    pub metrics: VendorMetrics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPerformanceSnapshot {
    pub vendor_id: i64,
    pub date: DateTime<Utc>,
    pub metrics: VendorMetrics,
}

impl NewPerformanceSnapshot {
    pub fn for_vendor(vendor: &Vendor, date: DateTime<Utc>) -> Self {
        Self { vendor_id: vendor.id, date, metrics: vendor.metrics }
    }
}
