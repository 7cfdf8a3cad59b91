use crate::db_types::OrderStatusType;

/// Narrows an order count for a single vendor. An empty filter counts every order the vendor has.
///
/// Multiple statuses are OR-ed together; every other criterion is AND-ed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderCountFilter {
    pub statuses: Vec<OrderStatusType>,
    pub rated_only: bool,
    pub acknowledged_only: bool,
}

impl OrderCountFilter {
    pub fn with_status(mut self, status: OrderStatusType) -> Self {
        self.statuses.push(status);
        self
    }

    /// Only count orders that carry a quality rating
    pub fn rated(mut self) -> Self {
        self.rated_only = true;
        self
    }

    /// Only count orders that the vendor has acknowledged
    pub fn acknowledged(mut self) -> Self {
        self.acknowledged_only = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && !self.rated_only && !self.acknowledged_only
    }
}
