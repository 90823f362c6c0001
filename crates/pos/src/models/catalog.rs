//! Catalog reference data: stores, products, customers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tillpoint_core::{CustomerId, Email, ProductId, StoreId};

/// A store document in the `stores` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Document id.
    pub id: StoreId,
    /// Display name.
    pub name: String,
    /// Optional physical location.
    pub location: Option<String>,
}

/// A product document in the `products` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Document id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Optional stock-keeping unit code.
    pub sku: Option<String>,
}

/// A customer document in the `customers` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Document id.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Optional contact email.
    pub email: Option<Email>,
}
