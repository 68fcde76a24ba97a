//! Entity types for the Clementine admin dashboard.
//!
//! These mirror the JSON documents held by the hosted content lake: field
//! names follow the store's wire format (`_id`, camelCase order fields,
//! `stock_quantity` on products).

mod id;
mod order;
mod product;
mod status;

pub use id::{AssetRef, OrderId, ProductId};
pub use order::{CartItem, ImageAsset, ImageField, Order};
pub use product::Product;
pub use status::{OrderStatus, StatusFilter};
