//! Unified error handling for the dashboard.

use clementine_core::{OrderId, ProductId};
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type for dashboard operations.
///
/// Every remote-mutating operation returns this alongside reporting the
/// failure through the operator's notification surface, so no write can
/// fail silently.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Content-lake operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The caller's session is not authenticated.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// No order with this id in the local collection.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// No product with this id in the local collection.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// A product edit operation was invoked with no edit in progress.
    #[error("No product edit in progress")]
    NoEditInProgress,

    /// Attempted to write a status the controls do not offer.
    #[error("Status is not selectable: {0}")]
    StatusNotSelectable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::OrderNotFound(OrderId::new("order-123"));
        assert_eq!(err.to_string(), "Order not found: order-123");

        let err = DashboardError::StatusNotSelectable("refunded".to_string());
        assert_eq!(err.to_string(), "Status is not selectable: refunded");
    }
}
