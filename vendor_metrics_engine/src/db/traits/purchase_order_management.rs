use crate::{
    db::traits::OrderCountFilter,
    db_types::{MetricsUpdate, NewPurchaseOrder, PurchaseOrder},
};

/// The `PurchaseOrderManagement` trait defines the behaviour for storing purchase orders and for answering the
/// aggregate queries used by the metric recalculations.
#[allow(async_fn_in_trait)]
pub trait PurchaseOrderManagement {
    type Error: std::error::Error;

    /// Stores a brand-new order. PO numbers are unique, so inserting an existing number is an error.
    /// No metrics are touched.
    async fn insert_order(&self, order: NewPurchaseOrder) -> Result<PurchaseOrder, Self::Error>;

    /// Fetches the order with the given id. If no order exists, `None` is returned.
    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<PurchaseOrder>, Self::Error>;

    /// Counts the vendor's stored orders that match the filter.
    async fn count_orders(&self, vendor_id: i64, filter: OrderCountFilter) -> Result<i64, Self::Error>;

    /// The sum of the quality ratings over all the vendor's stored orders that carry one. Zero if there are none.
    async fn sum_ratings(&self, vendor_id: i64) -> Result<f64, Self::Error>;

    /// In a single atomic transaction,
    /// * overwrites the stored order with `order`,
    /// * applies `metrics` to the record of the vendor that owns the order (skipped when the update is empty).
    ///
    /// Returns the order as stored.
    async fn save_order(&self, order: &PurchaseOrder, metrics: &MetricsUpdate) -> Result<PurchaseOrder, Self::Error>;
}
