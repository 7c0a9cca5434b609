//! # Cart
//!
//! Session-local shopping cart. Never persisted.
//!
//! Invariants:
//! - at most one item per product id
//! - every item has `quantity >= 1`; setting a quantity of 0 removes the item

use crate::record::Fields;
use crate::{Cents, FieldValue, Product, RecordId};
use serde::{Deserialize, Serialize};

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: RecordId,
    pub product_id: RecordId,
    /// Copy of the product at the time it was first added.
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// `price * quantity`, saturating.
    #[must_use]
    pub fn subtotal(&self) -> Cents {
        self.product.price.times(self.quantity)
    }
}

const CART_ITEM_FIELDS: &[&str] = &["id", "productId", "name", "price", "quantity", "subtotal"];

impl Fields for CartItem {
    fn field_names(&self) -> &'static [&'static str] {
        CART_ITEM_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Text(self.id.0.clone())),
            "productId" => Some(FieldValue::Text(self.product_id.0.clone())),
            "name" => Some(FieldValue::Text(self.product.name.clone())),
            "price" => Some(FieldValue::Money(self.product.price)),
            "quantity" => Some(FieldValue::Integer(i64::from(self.quantity))),
            "subtotal" => Some(FieldValue::Money(self.subtotal())),
            _ => None,
        }
    }
}

/// The cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item for a product, if present.
    #[must_use]
    pub fn item(&self, product_id: &RecordId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of all subtotals, saturating.
    #[must_use]
    pub fn total_price(&self) -> Cents {
        self.items
            .iter()
            .fold(Cents::ZERO, |sum, i| sum.saturating_add(i.subtotal()))
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// A zero quantity is ignored.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem {
                id: RecordId::generate(),
                product_id: product.id.clone(),
                product: product.clone(),
                quantity,
            });
        }
    }

    /// Remove the line for `product_id`; no-op when absent.
    pub fn remove_item(&mut self, product_id: &RecordId) {
        self.items.retain(|i| &i.product_id != product_id);
    }

    /// Set the quantity of an existing line; 0 removes it.
    ///
    /// Unknown products are ignored.
    pub fn update_quantity(&mut self, product_id: &RecordId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
        } else if let Some(item) = self.items.iter_mut().find(|i| &i.product_id == product_id) {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::mock_products;
    use chrono::Utc;

    #[test]
    fn adding_same_product_twice_merges() {
        let products = mock_products(Utc::now());
        let mut cart = Cart::new();
        cart.add_item(&products[0], 1);
        cart.add_item(&products[0], 2);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn totals() {
        let products = mock_products(Utc::now());
        let mut cart = Cart::new();
        cart.add_item(&products[0], 2); // 299.99
        cart.add_item(&products[2], 1); // 89.99
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Cents(2 * 29999 + 8999));
    }

    #[test]
    fn zero_quantity_removes() {
        let products = mock_products(Utc::now());
        let mut cart = Cart::new();
        cart.add_item(&products[1], 4);
        cart.update_quantity(&products[1].id, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_sets_value() {
        let products = mock_products(Utc::now());
        let mut cart = Cart::new();
        cart.add_item(&products[1], 4);
        cart.update_quantity(&products[1].id, 9);
        assert_eq!(cart.item(&products[1].id).map(|i| i.quantity), Some(9));

        cart.update_quantity(&products[3].id, 5);
        assert!(cart.item(&products[3].id).is_none());
    }

    #[test]
    fn add_zero_is_ignored() {
        let products = mock_products(Utc::now());
        let mut cart = Cart::new();
        cart.add_item(&products[0], 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_and_remove() {
        let products = mock_products(Utc::now());
        let mut cart = Cart::new();
        cart.add_item(&products[0], 1);
        cart.add_item(&products[1], 1);
        cart.remove_item(&products[0].id);
        assert_eq!(cart.items().len(), 1);
        cart.clear();
        assert_eq!(cart.total_price(), Cents::ZERO);
    }
}
