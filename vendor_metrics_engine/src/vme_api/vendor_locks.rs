use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use log::*;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// A registry of per-vendor async locks. Metric writes for one vendor are serialized by holding that vendor's lock
/// across the read-recalculate-write cycle. Clones share the same registry.
#[derive(Clone, Default)]
pub struct VendorLocks {
    locks: Arc<Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>>,
}

impl VendorLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to the vendor's metrics. The lock is released when the guard is dropped.
    pub async fn lock(&self, vendor_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            // A poisoned registry is still usable
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(locks.entry(vendor_id).or_default())
        };
        trace!("🔒️ Waiting for the metrics lock on vendor #{vendor_id}");
        lock.lock_owned().await
    }

    /// The number of vendors that have been locked at least once.
    pub fn len(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or_else(|e| e.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
