//! The in-progress sale cart.
//!
//! A [`Cart`] is an insertion-ordered collection of [`SaleItem`] lines,
//! unique by product id. All quantity and total bookkeeping lives here so
//! the rendering layer stays purely derived: every mutation keeps the
//! invariant `total_price == unit_price * quantity`.
//!
//! Quantity floor: updating a line to quantity zero removes it. The minus
//! button in the sales screen therefore needs no special casing, and a cart
//! never holds a zero-quantity line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A single product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    /// Product document id; unique within a cart.
    pub product_id: ProductId,
    /// Product name captured at the time the line was added.
    pub product_name: String,
    /// Unit price captured at the time the line was added.
    pub unit_price: Decimal,
    /// Number of units, always >= 1.
    pub quantity: u32,
    /// Line total, always `unit_price * quantity`.
    pub total_price: Decimal,
}

impl SaleItem {
    fn new(product_id: ProductId, product_name: String, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            product_id,
            product_name,
            unit_price,
            quantity,
            total_price: unit_price * Decimal::from(quantity),
        }
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_price = self.unit_price * Decimal::from(quantity);
    }
}

/// An ordered collection of sale lines, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<SaleItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(|i| i.total_price).sum()
    }

    /// Add units of a product to the cart.
    ///
    /// Merges into an existing line for the same product (summing the
    /// quantities) or appends a new line. Adding zero units is a no-op.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        product_name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) {
        if quantity == 0 {
            return;
        }

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => {
                let merged = line.quantity.saturating_add(quantity);
                line.set_quantity(merged);
            }
            None => self.items.push(SaleItem::new(
                product_id,
                product_name.into(),
                unit_price,
                quantity,
            )),
        }
    }

    /// Set the quantity of an existing line, recomputing its total.
    ///
    /// A quantity of zero removes the line. Returns `false` when no line
    /// with that product id exists (the cart is left unchanged).
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }

        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(line) => {
                line.set_quantity(quantity);
                true
            }
            None => false,
        }
    }

    /// Remove the line with the given product id.
    ///
    /// Idempotent: returns `false` when no such line exists.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() != before
    }

    /// Drop all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with(entries: &[(&str, i64, u32)]) -> Cart {
        let mut cart = Cart::new();
        for (id, price, qty) in entries {
            cart.add_item(ProductId::new(*id), format!("product {id}"), Decimal::from(*price), *qty);
        }
        cart
    }

    #[test]
    fn line_total_tracks_quantity_updates() {
        let mut cart = cart_with(&[("p1", 10, 2)]);
        assert_eq!(cart.items()[0].total_price, Decimal::from(20));

        assert!(cart.update_quantity(&ProductId::new("p1"), 3));

        let line = &cart.items()[0];
        assert_eq!(line.quantity, 3);
        assert_eq!(line.total_price, Decimal::from(30));
        assert_eq!(line.total_price, line.unit_price * Decimal::from(line.quantity));
    }

    #[test]
    fn update_to_zero_removes_the_line() {
        let mut cart = cart_with(&[("p1", 10, 2), ("p2", 5, 1)]);

        assert!(cart.update_quantity(&ProductId::new("p1"), 0));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product_id, ProductId::new("p2"));
    }

    #[test]
    fn update_of_unknown_product_is_a_noop() {
        let mut cart = cart_with(&[("p1", 10, 2)]);
        let snapshot = cart.clone();

        assert!(!cart.update_quantity(&ProductId::new("missing"), 4));

        assert_eq!(cart, snapshot);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut cart = cart_with(&[("p1", 10, 2)]);

        assert!(cart.remove(&ProductId::new("p1")));
        let snapshot = cart.clone();
        assert!(!cart.remove(&ProductId::new("p1")));

        assert_eq!(cart, snapshot);
        assert!(cart.is_empty());
    }

    #[test]
    fn add_merges_lines_for_the_same_product() {
        let mut cart = cart_with(&[("p1", 10, 2)]);
        cart.add_item(ProductId::new("p1"), "product p1", Decimal::from(10), 3);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.items()[0].total_price, Decimal::from(50));
    }

    #[test]
    fn add_of_zero_units_is_a_noop() {
        let mut cart = Cart::new();
        cart.add_item(ProductId::new("p1"), "product p1", Decimal::from(10), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn preserves_insertion_order() {
        let cart = cart_with(&[("p3", 1, 1), ("p1", 2, 1), ("p2", 3, 1)]);
        let order: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(order, ["p3", "p1", "p2"]);
    }

    #[test]
    fn subtotal_and_count_aggregate_all_lines() {
        let cart = cart_with(&[("p1", 10, 2), ("p2", 5, 3)]);
        assert_eq!(cart.subtotal(), Decimal::from(35));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = cart_with(&[("p1", 10, 2), ("p2", 5, 3)]);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }
}
