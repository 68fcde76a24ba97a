//! Order management commands.

use clementine_core::{OrderId, OrderStatus, StatusFilter};
use clementine_dashboard::Outcome;

use crate::AdminDashboard;

/// List orders, optionally narrowed by a status filter.
pub async fn list(
    dashboard: &mut AdminDashboard,
    filter: StatusFilter,
) -> Result<(), Box<dyn std::error::Error>> {
    dashboard.refresh_orders().await?;
    dashboard.set_status_filter(filter);

    let orders = dashboard.filtered_orders();
    if orders.is_empty() {
        println!("No orders.");
        return Ok(());
    }

    for order in orders {
        println!(
            "{}  {}  {:<24} ${:>10}  {:>8}  {} item(s)",
            order.id,
            order.order_date.format("%Y-%m-%d"),
            order.customer_name(),
            order.total,
            order.status,
            order.cart_items.len(),
        );
    }
    Ok(())
}

/// Change an order's delivery status (confirmation required).
pub async fn set_status(
    dashboard: &mut AdminDashboard,
    id: &OrderId,
    status: OrderStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    dashboard.refresh_orders().await?;
    if dashboard.set_order_status(id, status).await? == Outcome::Cancelled {
        println!("Cancelled.");
    }
    Ok(())
}

/// Delete an order (confirmation required).
pub async fn delete(
    dashboard: &mut AdminDashboard,
    id: &OrderId,
) -> Result<(), Box<dyn std::error::Error>> {
    dashboard.refresh_orders().await?;
    if dashboard.delete_order(id).await? == Outcome::Cancelled {
        println!("Cancelled.");
    }
    Ok(())
}
