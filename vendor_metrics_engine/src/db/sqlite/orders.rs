use chrono::Utc;
use log::{debug, trace};
use sqlx::{types::Json, QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db::{
        sqlite::{vendors, SqliteDatabaseError},
        traits::OrderCountFilter,
    },
    db_types::{NewPurchaseOrder, PoNumber, PurchaseOrder},
};

const ORDER_COLUMNS: &str = "id, po_number, vendor_id, order_date, delivery_date, items, quantity, status, \
                             quality_rating, issue_date, acknowledgment_date, created_at, updated_at";

/// Inserts a new purchase order using the given connection. This is not atomic. You can embed this call inside a
/// transaction if you need to ensure atomicity, and pass `&mut tx` as the connection argument.
pub async fn insert_order(
    order: NewPurchaseOrder,
    conn: &mut SqliteConnection,
) -> Result<PurchaseOrder, SqliteDatabaseError> {
    if let Some(id) = order_exists(&order.po_number, &mut *conn).await? {
        debug!("🗃️ Order {} already exists with id {id}", order.po_number);
        return Err(SqliteDatabaseError::DuplicateOrder(order.po_number.to_string()));
    }
    if vendors::fetch_vendor(order.vendor_id, &mut *conn).await?.is_none() {
        return Err(SqliteDatabaseError::VendorNotFound(order.vendor_id));
    }
    let now = Utc::now();
    let sql = format!(
        "INSERT INTO purchase_orders (po_number, vendor_id, order_date, delivery_date, items, quantity, status, \
         quality_rating, issue_date, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         RETURNING {ORDER_COLUMNS}"
    );
    let order = sqlx::query_as::<_, PurchaseOrder>(&sql)
        .bind(order.po_number)
        .bind(order.vendor_id)
        .bind(order.order_date)
        .bind(order.delivery_date)
        .bind(Json(order.items))
        .bind(order.quantity)
        .bind(order.status)
        .bind(order.quality_rating)
        .bind(order.issue_date)
        .bind(now)
        .bind(now)
        .fetch_one(conn)
        .await?;
    Ok(order)
}

pub async fn fetch_order_by_id(
    id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<PurchaseOrder>, SqliteDatabaseError> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM purchase_orders WHERE id = $1");
    let order = sqlx::query_as::<_, PurchaseOrder>(&sql).bind(id).fetch_optional(conn).await?;
    Ok(order)
}

/// Checks whether an order with the given PO number already exists. If it does, the `id` of the order is returned.
pub async fn order_exists(po_number: &PoNumber, conn: &mut SqliteConnection) -> Result<Option<i64>, SqliteDatabaseError> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM purchase_orders WHERE po_number = $1")
        .bind(po_number.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(id)
}

/// Counts the vendor's orders that match the criteria in the `OrderCountFilter`
pub async fn count_orders(
    vendor_id: i64,
    filter: OrderCountFilter,
    conn: &mut SqliteConnection,
) -> Result<i64, SqliteDatabaseError> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM purchase_orders WHERE vendor_id = ");
    builder.push_bind(vendor_id);
    if !filter.statuses.is_empty() {
        builder.push(" AND status IN (");
        let mut statuses = builder.separated(", ");
        for status in filter.statuses {
            statuses.push_bind(status);
        }
        statuses.push_unseparated(")");
    }
    if filter.rated_only {
        builder.push(" AND quality_rating IS NOT NULL");
    }
    if filter.acknowledged_only {
        builder.push(" AND acknowledgment_date IS NOT NULL");
    }
    trace!("🗃️ Executing query: {}", builder.sql());
    let count = builder.build_query_scalar::<i64>().fetch_one(conn).await?;
    Ok(count)
}

/// The sum of all quality ratings on the vendor's orders. `TOTAL` yields 0.0 rather than NULL when nothing is rated.
pub async fn sum_ratings(vendor_id: i64, conn: &mut SqliteConnection) -> Result<f64, SqliteDatabaseError> {
    let sum = sqlx::query_scalar::<_, f64>("SELECT TOTAL(quality_rating) FROM purchase_orders WHERE vendor_id = $1")
        .bind(vendor_id)
        .fetch_one(conn)
        .await?;
    Ok(sum)
}

/// Overwrites every mutable column of the stored order with the values in `order`.
pub(crate) async fn update_order(
    order: &PurchaseOrder,
    conn: &mut SqliteConnection,
) -> Result<PurchaseOrder, SqliteDatabaseError> {
    let sql = format!(
        "UPDATE purchase_orders SET po_number = $1, vendor_id = $2, order_date = $3, delivery_date = $4, items = $5, \
         quantity = $6, status = $7, quality_rating = $8, issue_date = $9, acknowledgment_date = $10, updated_at = \
         $11 WHERE id = $12 RETURNING {ORDER_COLUMNS}"
    );
    trace!("🗃️ Order {} updating with new values: {order:?}", order.po_number);
    let updated = sqlx::query_as::<_, PurchaseOrder>(&sql)
        .bind(order.po_number.clone())
        .bind(order.vendor_id)
        .bind(order.order_date)
        .bind(order.delivery_date)
        .bind(order.items.clone())
        .bind(order.quantity)
        .bind(order.status)
        .bind(order.quality_rating)
        .bind(order.issue_date)
        .bind(order.acknowledgment_date)
        .bind(Utc::now())
        .bind(order.id)
        .fetch_optional(conn)
        .await?
        .ok_or(SqliteDatabaseError::OrderNotFound(order.id))?;
    Ok(updated)
}
