//! Command implementations for the admin CLI.

pub mod metrics;
pub mod orders;
pub mod products;
