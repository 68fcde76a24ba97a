//! Aggregate metrics command.

use crate::AdminDashboard;

/// Fetch all orders and print the derived metrics.
pub async fn show(dashboard: &mut AdminDashboard) -> Result<(), Box<dyn std::error::Error>> {
    dashboard.refresh_orders().await?;
    let metrics = dashboard.metrics();

    println!("Total Revenue       ${}", metrics.total_revenue);
    println!("Total Orders        {}", metrics.total_orders);
    println!("Total Customers     {}", metrics.total_customers);
    println!("Pending Deliveries  {}", metrics.pending_deliveries);
    Ok(())
}
