//! Product documents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{AssetRef, ProductId};

/// A product document as held by the content lake.
///
/// Products are created externally; the dashboard reads them, patches a
/// subset of fields, and deletes them by id. The dashboard only ever holds
/// a transient local copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    /// Unit price. Non-negative by store convention; not enforced here.
    pub price: Decimal,
    pub stock_quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference to the product image asset, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<AssetRef>,
    /// Informally a delimited list, stored as a single string.
    #[serde(default)]
    pub tags: String,
}
