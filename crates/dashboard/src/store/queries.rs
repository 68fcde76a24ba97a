//! Projection queries issued by the dashboard.

/// All product documents, full shape.
pub const PRODUCTS: &str = r#"*[_type == "product"]"#;

/// All order documents, projecting exactly the fields the dashboard reads
/// and resolving each cart item to its denormalized `{name, image}` snapshot.
pub const ORDERS_WITH_ITEMS: &str = r#"*[_type == "order"]{
  _id,
  firstName,
  lastName,
  phone,
  email,
  address,
  city,
  zipCode,
  total,
  discount,
  orderDate,
  status,
  cartItems[]->{
    name,
    image
  }
}"#;
