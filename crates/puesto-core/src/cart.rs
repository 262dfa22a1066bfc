//! # Sale Cart
//!
//! Builds the frozen [`SoldItem`] snapshots for a sale in progress.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Frontend Action          Cart Call              Effect                 │
//! │  ───────────────          ─────────              ──────                 │
//! │  Click product ─────────► add(&product) ───────► qty +1 (aggregated    │
//! │                                                  by product id)         │
//! │  Click "-" ─────────────► decrement(id) ───────► qty -1, removed at 0  │
//! │  Click remove ──────────► remove(id) ──────────► line dropped          │
//! │  Register sale ─────────► checkout() ──────────► SaleDraft             │
//! │                                                                         │
//! │  Unit price and unit cost are FROZEN when the product first enters     │
//! │  the cart; later product edits do not reprice the open ticket.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, SaleDraft, SoldItem};

impl SoldItem {
    /// Creates a sold-item snapshot from a product and a quantity.
    ///
    /// `unit_cost` is the product's ingredient cost per unit, frozen here.
    pub fn from_product(product: &Product, quantity: f64) -> Self {
        SoldItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
            line_total: product.price * quantity,
            unit_cost: product.total_cost,
            line_cost: product.total_cost * quantity,
        }
    }

    fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
        self.line_total = self.unit_price * quantity;
        self.line_cost = self.unit_cost * quantity;
    }
}

/// The sale ticket under construction.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product increases
///   its quantity).
/// - Line totals always equal frozen unit price/cost × quantity.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<SoldItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of a product, aggregating with an existing line.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.set_quantity(item.quantity + 1.0);
            return;
        }

        self.items.push(SoldItem::from_product(product, 1.0));
    }

    /// Removes one unit of a product; the line disappears at zero.
    pub fn decrement(&mut self, product_id: &str) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            if item.quantity > 1.0 {
                item.set_quantity(item.quantity - 1.0);
            } else {
                self.remove(product_id);
            }
        }
    }

    /// Drops a product's line entirely.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the lines currently in the cart.
    pub fn items(&self) -> &[SoldItem] {
        &self.items
    }

    /// Number of distinct product lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> f64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Ticket total at frozen unit prices.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|i| i.line_total).sum()
    }

    /// Ticket ingredient cost at frozen unit costs.
    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(|i| i.line_cost).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Closes the ticket into a [`SaleDraft`] ready for registration.
    ///
    /// `profit = total - total_cost` by construction. Errors on an empty
    /// cart; the draft gets its date/time stamps from the store.
    pub fn checkout(&self) -> CoreResult<SaleDraft> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let total = self.total();
        let total_cost = self.total_cost();

        Ok(SaleDraft {
            items: self.items.clone(),
            total,
            total_cost,
            profit: total - total_cost,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
