//! Registers vendors and reads their current metrics.
use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::VendorManagement,
    db_types::{NewVendor, Vendor},
    vme_api::errors::VendorMetricsError,
};

pub struct VendorApi<B> {
    db: B,
}

impl<B: Debug> Debug for VendorApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VendorApi ({:?})", self.db)
    }
}

impl<B> VendorApi<B>
where B: VendorManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Registers a new vendor. All four metrics start at zero.
    ///
    /// The vendor code and name may not be blank, and the vendor code must be unique.
    pub async fn register_vendor(&self, vendor: NewVendor) -> Result<Vendor, VendorMetricsError> {
        if vendor.vendor_code.as_str().trim().is_empty() {
            return Err(VendorMetricsError::invalid("A vendor code is required"));
        }
        if vendor.name.trim().is_empty() {
            return Err(VendorMetricsError::invalid(format!("Vendor {} needs a name", vendor.vendor_code)));
        }
        let vendor = self.db.insert_vendor(vendor).await.map_err(VendorMetricsError::database)?;
        info!("🏭️ Vendor {} registered as #{}", vendor.vendor_code, vendor.id);
        Ok(vendor)
    }

    pub async fn vendor_by_id(&self, vendor_id: i64) -> Result<Option<Vendor>, VendorMetricsError> {
        self.db.fetch_vendor(vendor_id).await.map_err(VendorMetricsError::database)
    }

    pub async fn vendors(&self) -> Result<Vec<Vendor>, VendorMetricsError> {
        self.db.fetch_vendors().await.map_err(VendorMetricsError::database)
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
