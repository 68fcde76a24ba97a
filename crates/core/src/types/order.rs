//! Order documents with denormalized line items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{AssetRef, OrderId};
use super::status::OrderStatus;

/// A line item embedded in an order: a denormalized snapshot of the
/// purchased product (name plus optional image), resolved by the order
/// projection query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageField>,
}

/// The nested image shape on cart items: `{"asset": {"_ref": "image-..."}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageField {
    pub asset: ImageAsset,
}

/// Asset pointer inside an [`ImageField`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(rename = "_ref")]
    pub reference: AssetRef,
}

/// An order document as returned by the order projection query.
///
/// Orders are created externally (by the storefront checkout); the
/// dashboard reads them, mutates `status` in place, and deletes them by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub total: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    pub order_date: DateTime<Utc>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
}

impl Order {
    /// Customer display name ("First Last").
    #[must_use]
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes_from_projection() {
        let json = r#"{
            "_id": "order-42",
            "firstName": "Nadia",
            "lastName": "Osei",
            "phone": "555-0117",
            "email": "nadia@example.com",
            "address": "12 Elm Street",
            "city": "Portsmouth",
            "zipCode": "03801",
            "total": 175,
            "discount": 10,
            "orderDate": "2025-11-03T14:22:00Z",
            "status": "pending",
            "cartItems": [
                { "name": "Walnut Side Table", "image": { "asset": { "_ref": "image-abc123-800x600-png" } } },
                { "name": "Gift Card" }
            ]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::new("order-42"));
        assert_eq!(order.customer_name(), "Nadia Osei");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Decimal::from(175));
        assert_eq!(order.cart_items.len(), 2);
        assert_eq!(
            order.cart_items.first().unwrap().image.as_ref().unwrap().asset.reference,
            AssetRef::new("image-abc123-800x600-png")
        );
        assert_eq!(order.cart_items.get(1).unwrap().image, None);
    }

    #[test]
    fn test_order_tolerates_missing_status_and_items() {
        let json = r#"{
            "_id": "order-7",
            "firstName": "Ben",
            "lastName": "Ruiz",
            "phone": "555-0102",
            "email": "ben@example.com",
            "address": "9 Oak Lane",
            "city": "Dover",
            "zipCode": "03820",
            "total": 50,
            "orderDate": "2025-11-04T09:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Unset);
        assert_eq!(order.discount, Decimal::ZERO);
        assert!(order.cart_items.is_empty());
    }
}
