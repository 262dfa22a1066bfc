//! # Application State
//!
//! The in-memory mirror of the five remote data sources plus the derived
//! daily summary. Owned exclusively by the store's event loop; everyone
//! else sees immutable clones through a `watch` channel.

use puesto_core::{DailySummary, Expense, Ingredient, Product, Sale, View};

/// The mirrored application state.
///
/// Collections are replaced wholesale on every remote notification - they
/// are never incrementally patched on this side. `daily_summary` is fully
/// derived and recomputed by the store after every relevant change.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub products: Vec<Product>,
    pub ingredients: Vec<Ingredient>,
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,

    /// Mirror of the remote starting-cash scalar.
    pub starting_cash: f64,

    /// The date the dashboard is focused on, `YYYY-MM-DD`.
    pub selected_date: String,

    /// Presentation-layer view selector; no effect on synchronization.
    pub current_view: View,

    /// Derived summary for `selected_date`.
    pub daily_summary: DailySummary,
}

impl AppState {
    /// The empty pre-snapshot state focused on `date`.
    pub fn for_date(date: impl Into<String>) -> Self {
        let date = date.into();
        AppState {
            products: Vec::new(),
            ingredients: Vec::new(),
            sales: Vec::new(),
            expenses: Vec::new(),
            starting_cash: 0.0,
            selected_date: date.clone(),
            current_view: View::default(),
            daily_summary: DailySummary::empty(date),
        }
    }

    /// Looks up a product in the mirror by its remote key.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up an ingredient in the mirror by its remote key.
    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_all_zeros() {
        let state = AppState::for_date("2025-01-01");

        assert!(state.products.is_empty());
        assert_eq!(state.starting_cash, 0.0);
        assert_eq!(state.current_view, View::Summary);
        assert_eq!(state.daily_summary, DailySummary::empty("2025-01-01"));
    }
}
