use std::fmt::Debug;

use chrono::Utc;
use log::*;

use crate::{
    db::traits::{PurchaseOrderManagement, VendorManagement},
    db_types::{NewPurchaseOrder, PurchaseOrder},
    events::{EventProducers, MetricsUpdatedEvent},
    observer::{on_order_pre_save, validate_quantity},
    vme_api::{errors::VendorMetricsError, vendor_locks::VendorLocks},
};

/// `PurchaseOrderApi` is the entry point for creating and changing purchase orders.
///
/// Every update runs the metric recalculations for the order's vendor, so as long as orders are only changed through
/// this API, the vendor metrics stay consistent with the order history. Clones share their vendor locks, and so can be
/// handed to concurrent tasks.
pub struct PurchaseOrderApi<B> {
    db: B,
    locks: VendorLocks,
    producers: EventProducers,
}

impl<B> Debug for PurchaseOrderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PurchaseOrderApi ({} vendors locked so far)", self.locks.len())
    }
}

impl<B: Clone> Clone for PurchaseOrderApi<B> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), locks: self.locks.clone(), producers: self.producers.clone() }
    }
}

impl<B> PurchaseOrderApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, locks: VendorLocks::new(), producers }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> PurchaseOrderApi<B>
where B: VendorManagement + PurchaseOrderManagement
{
    /// Stores a new purchase order. Creating an order never changes the vendor's metrics.
    ///
    /// ## Failure modes
    /// * `ValidationViolation` if the quantity is not positive.
    /// * `VendorNotFound` if the vendor does not exist.
    /// * `DatabaseError` if the PO number is already taken, or the store fails.
    pub async fn create_order(&self, order: NewPurchaseOrder) -> Result<PurchaseOrder, VendorMetricsError> {
        validate_quantity(&order.po_number, order.quantity)?;
        let vendor_id = order.vendor_id;
        if self.db.fetch_vendor(vendor_id).await.map_err(VendorMetricsError::database)?.is_none() {
            return Err(VendorMetricsError::VendorNotFound(vendor_id));
        }
        let order = self.db.insert_order(order).await.map_err(VendorMetricsError::database)?;
        debug!("📦️ Order {} created for vendor #{vendor_id}", order.po_number);
        Ok(order)
    }

    /// Saves a change to an existing order, identified by `proposed.id`.
    ///
    /// While holding the vendor's lock, the stored order is read back, the change is run through
    /// [`on_order_pre_save`], and the adjusted order is saved together with the resulting metric writes. Subscribers
    /// to `on_metrics_updated` are notified if any metric changed.
    ///
    /// Returns the order as saved, which may differ from `proposed`: completing an order stamps its delivery date, and
    /// an existing acknowledgment date is never overwritten. An order cannot be moved to another vendor.
    pub async fn update_order(&self, proposed: PurchaseOrder) -> Result<PurchaseOrder, VendorMetricsError> {
        let vendor_id = proposed.vendor_id;
        let _guard = self.locks.lock(vendor_id).await;
        let old = self
            .db
            .fetch_order_by_id(proposed.id)
            .await
            .map_err(VendorMetricsError::database)?
            .ok_or(VendorMetricsError::OrderNotFound(proposed.id))?;
        let outcome = on_order_pre_save(&self.db, Some(&old), proposed, Utc::now()).await?;
        let saved = self.db.save_order(&outcome.order, &outcome.metrics).await.map_err(|e| {
            error!("📦️ Could not save order {}. Neither the order nor the metrics changed. {e}", outcome.order.po_number);
            VendorMetricsError::database(e)
        })?;
        if outcome.metrics.is_empty() {
            trace!("📦️ Order {} saved. No metrics changed.", saved.po_number);
        } else {
            debug!("📦️ Order {} saved. Vendor #{vendor_id} metrics updated: {:?}", saved.po_number, outcome.triggers);
            self.producers.publish_metrics_updated(MetricsUpdatedEvent::new(saved.clone(), outcome.metrics)).await;
        }
        Ok(saved)
    }

    /// Records the vendor's acknowledgment of the order as of now. Orders that are already acknowledged are returned
    /// as they are.
    pub async fn acknowledge_order(&self, order_id: i64) -> Result<PurchaseOrder, VendorMetricsError> {
        let mut order = self.order_by_id(order_id).await?.ok_or(VendorMetricsError::OrderNotFound(order_id))?;
        if order.is_acknowledged() {
            debug!("📦️ Order {} was already acknowledged", order.po_number);
            return Ok(order);
        }
        order.acknowledgment_date = Some(Utc::now());
        self.update_order(order).await
    }

    pub async fn order_by_id(&self, order_id: i64) -> Result<Option<PurchaseOrder>, VendorMetricsError> {
        self.db.fetch_order_by_id(order_id).await.map_err(VendorMetricsError::database)
    }
}

#[cfg(test)]
mod test {
    use mockall::predicate::eq;
    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        db::traits::OrderCountFilter,
        db_types::{MetricsUpdate, OrderStatusType, PoNumber},
        events::EventProducer,
        test_utils::mocks::{order, vendor, MockErr, MockStore},
    };

    fn producers() -> (EventProducers, mpsc::Receiver<MetricsUpdatedEvent>) {
        let (tx, rx) = mpsc::channel(10);
        let mut producers = EventProducers::default();
        producers.metrics_updated_producer.push(EventProducer::new(tx));
        (producers, rx)
    }

    #[tokio::test]
    async fn create_rejects_bad_quantity_and_unknown_vendors() {
        let mut store = MockStore::new();
        store.expect_fetch_vendor().with(eq(9)).returning(|_| Ok(None));
        store.expect_insert_order().never();
        let api = PurchaseOrderApi::new(store, EventProducers::default());
        let delivery = Utc::now();
        let err = api.create_order(NewPurchaseOrder::new(PoNumber::from("PO1"), 9, delivery, 0)).await.unwrap_err();
        assert!(matches!(err, VendorMetricsError::ValidationViolation(_)));
        let err = api.create_order(NewPurchaseOrder::new(PoNumber::from("PO1"), 9, delivery, 5)).await.unwrap_err();
        assert_eq!(err, VendorMetricsError::VendorNotFound(9));
    }

    #[tokio::test]
    async fn updating_a_missing_order() {
        let mut store = MockStore::new();
        store.expect_fetch_order_by_id().returning(|_| Ok(None));
        store.expect_save_order().never();
        let api = PurchaseOrderApi::new(store, EventProducers::default());
        let err = api.update_order(order(3, 1)).await.unwrap_err();
        assert_eq!(err, VendorMetricsError::OrderNotFound(3));
    }

    #[tokio::test]
    async fn completion_saves_metrics_and_notifies() {
        let _ = env_logger::try_init();
        let mut store = MockStore::new();
        store.expect_fetch_order_by_id().with(eq(1)).returning(|id| Ok(Some(order(id, 1))));
        store.expect_fetch_vendor().returning(|id| Ok(Some(vendor(id))));
        store.expect_count_orders().returning(|_, filter| {
            if filter == OrderCountFilter::default() {
                Ok(1)
            } else {
                Ok(0)
            }
        });
        store
            .expect_save_order()
            .times(1)
            .withf(|o, m| {
                o.is_completed() &&
                    *m == MetricsUpdate::default().with_on_time_delivery_rate(100.0).with_fulfillment_rate(100.0)
            })
            .returning(|o, _| Ok(o.clone()));
        let (producers, mut rx) = producers();
        let api = PurchaseOrderApi::new(store, producers);
        let mut proposed = order(1, 1);
        proposed.status = OrderStatusType::Completed;
        let saved = api.update_order(proposed).await.unwrap();
        assert!(saved.is_completed());
        let event = rx.recv().await.unwrap();
        assert_eq!(event.vendor_id, 1);
        assert_eq!(event.order.id, 1);
        assert_eq!(event.update.fulfillment_rate, Some(100.0));
    }

    #[tokio::test]
    async fn edits_without_metric_changes_are_silent() {
        let mut store = MockStore::new();
        store.expect_fetch_order_by_id().returning(|id| Ok(Some(order(id, 1))));
        store.expect_fetch_vendor().returning(|id| Ok(Some(vendor(id))));
        store.expect_save_order().times(1).returning(|o, _| Ok(o.clone()));
        let (producers, mut rx) = producers();
        let api = PurchaseOrderApi::new(store, producers);
        let mut proposed = order(1, 1);
        proposed.quantity = 20;
        let saved = api.update_order(proposed).await.unwrap();
        assert_eq!(saved.quantity, 20);
        drop(api);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn failed_save_is_reported() {
        let mut store = MockStore::new();
        store.expect_fetch_order_by_id().returning(|id| Ok(Some(order(id, 1))));
        store.expect_fetch_vendor().returning(|id| Ok(Some(vendor(id))));
        store.expect_count_orders().returning(|_, _| Ok(0));
        store.expect_save_order().returning(|_, _| Err(MockErr::new("database is locked")));
        let api = PurchaseOrderApi::new(store, EventProducers::default());
        let mut proposed = order(1, 1);
        proposed.acknowledgment_date = Some(proposed.issue_date);
        let err = api.update_order(proposed).await.unwrap_err();
        assert_eq!(err, VendorMetricsError::DatabaseError("database is locked".into()));
    }

    #[tokio::test]
    async fn moving_an_order_to_another_vendor_is_rejected() {
        let mut store = MockStore::new();
        store.expect_fetch_order_by_id().with(eq(2)).returning(|id| Ok(Some(order(id, 1))));
        store.expect_count_orders().never();
        store.expect_save_order().never();
        let (producers, mut rx) = producers();
        let api = PurchaseOrderApi::new(store, producers);
        let mut proposed = order(2, 2);
        proposed.status = OrderStatusType::Completed;
        let err = api.update_order(proposed).await.unwrap_err();
        assert!(matches!(err, VendorMetricsError::ValidationViolation(_)), "{err}");
        drop(api);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn acknowledging_twice_is_a_no_op() {
        let mut store = MockStore::new();
        store.expect_fetch_order_by_id().returning(|id| {
            let mut o = order(id, 1);
            o.acknowledgment_date = Some(o.issue_date);
            Ok(Some(o))
        });
        store.expect_save_order().never();
        let api = PurchaseOrderApi::new(store, EventProducers::default());
        let order = api.acknowledge_order(4).await.unwrap();
        assert!(order.is_acknowledged());
    }
}
