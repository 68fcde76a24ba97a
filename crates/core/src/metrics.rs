//! Derived order metrics and status filtering.
//!
//! Metrics are never stored: they are recomputed from scratch whenever the
//! order collection changes. Both functions here are pure and total over
//! the order shapes in [`crate::types`].

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::types::{Order, OrderStatus, StatusFilter};

/// Summary figures shown in the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metrics {
    /// Arithmetic sum of every order's `total`, accumulated as given
    /// (no currency rounding policy).
    pub total_revenue: Decimal,
    /// Number of orders.
    pub total_orders: usize,
    /// Number of distinct `email` values (case-sensitive, exact match).
    /// A cardinality, not a real customer entity.
    pub total_customers: usize,
    /// Orders whose status is exactly `pending`. Unset or unknown
    /// statuses never count.
    pub pending_deliveries: usize,
}

impl Metrics {
    /// Compute metrics over an order collection. An empty collection
    /// yields all-zero metrics.
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let total_revenue = orders.iter().map(|order| order.total).sum();
        let total_customers = orders
            .iter()
            .map(|order| order.email.as_str())
            .collect::<HashSet<_>>()
            .len();
        let pending_deliveries = orders
            .iter()
            .filter(|order| order.status == OrderStatus::Pending)
            .count();

        Self {
            total_revenue,
            total_orders: orders.len(),
            total_customers,
            pending_deliveries,
        }
    }
}

/// Select the orders matching `filter`, preserving their relative order.
/// [`StatusFilter::All`] is the identity.
#[must_use]
pub fn filter_orders(orders: &[Order], filter: StatusFilter) -> Vec<&Order> {
    orders
        .iter()
        .filter(|order| filter.matches(&order.status))
        .collect()
}
