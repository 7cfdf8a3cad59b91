use crate::db_types::{NewVendor, Vendor};

/// The `VendorManagement` trait defines behaviour for registering vendors and reading them back, aggregate metrics
/// included.
///
/// There is no way to write metrics here. They only change when an order is saved together with its recalculated
/// metrics, through [`PurchaseOrderManagement::save_order`](super::PurchaseOrderManagement::save_order).
#[allow(async_fn_in_trait)]
pub trait VendorManagement {
    type Error: std::error::Error;

    /// Registers a new vendor with all metrics set to zero. Vendor codes are unique, so registering an existing code
    /// is an error.
    async fn insert_vendor(&self, vendor: NewVendor) -> Result<Vendor, Self::Error>;

    /// Fetches the vendor with the given id. If no vendor exists, `None` is returned.
    async fn fetch_vendor(&self, vendor_id: i64) -> Result<Option<Vendor>, Self::Error>;

    /// Fetches every registered vendor, ordered by id.
    async fn fetch_vendors(&self) -> Result<Vec<Vendor>, Self::Error>;
}
