//! # Recipe Costing
//!
//! Builds the frozen [`RecipeLine`] snapshots embedded in products and
//! computes the cost/margin preview the product form shows before save.
//!
//! ## Freezing
//! A recipe line copies the ingredient's name, unit, and unit cost at
//! authoring time. Repricing an ingredient afterwards changes future
//! products only; saved products keep their historical cost.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Ingredient, Product, RecipeLine};

impl RecipeLine {
    /// Creates a frozen recipe line from an ingredient and a quantity.
    ///
    /// `line_cost = quantity × unit_cost`, captured at this moment.
    pub fn from_ingredient(ingredient: &Ingredient, quantity: f64) -> Self {
        RecipeLine {
            ingredient_id: ingredient.id.clone(),
            name: ingredient.name.clone(),
            quantity,
            unit: ingredient.unit.clone(),
            unit_cost: ingredient.unit_cost,
            line_cost: ingredient.unit_cost * quantity,
        }
    }
}

/// Sums the line costs of a recipe.
pub fn recipe_cost(lines: &[RecipeLine]) -> f64 {
    lines.iter().map(|l| l.line_cost).sum()
}

impl Product {
    /// Returns the ingredient cost of one unit per the current recipe.
    pub fn recipe_cost(&self) -> f64 {
        recipe_cost(&self.recipe)
    }

    /// Re-derives `total_cost` from the recipe.
    ///
    /// Callers run this before every save; the store does not re-validate
    /// the invariant.
    pub fn recompute_cost(&mut self) {
        self.total_cost = self.recipe_cost();
    }
}

// =============================================================================
// Product Costing Preview
// =============================================================================

/// Cost/margin preview for a product being authored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductCosting {
    /// Sum of the recipe's line costs.
    #[serde(rename = "costoTotal")]
    pub total_cost: f64,

    /// `price - total_cost`.
    #[serde(rename = "gananciaNeta")]
    pub net_profit: f64,

    /// `net_profit / price × 100`, or `0` when price is not positive.
    #[serde(rename = "margenGanancia")]
    pub profit_margin: f64,
}

impl ProductCosting {
    /// Computes the preview for a price and recipe.
    pub fn of(price: f64, recipe: &[RecipeLine]) -> Self {
        let total_cost = recipe_cost(recipe);
        let net_profit = price - total_cost;
        let profit_margin = if price > 0.0 {
            net_profit / price * 100.0
        } else {
            0.0
        };

        ProductCosting {
            total_cost,
            net_profit,
            profit_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn ingredient(id: &str, unit_cost: f64) -> Ingredient {
        Ingredient {
            id: id.into(),
            name: format!("Ingrediente {id}"),
            unit: "kg".into(),
            unit_cost,
            stock: 10.0,
            min_stock: 1.0,
        }
    }

    #[test]
    fn recipe_line_freezes_ingredient_cost() {
        let mut ing = ingredient("ing-1", 4000.0);
        let line = RecipeLine::from_ingredient(&ing, 0.25);

        assert_eq!(line.ingredient_id, "ing-1");
        assert_eq!(line.unit_cost, 4000.0);
        assert_eq!(line.line_cost, 1000.0);

        // Repricing the ingredient does not touch the frozen line
        ing.unit_cost = 9000.0;
        assert_eq!(line.line_cost, 1000.0);
    }

    #[test]
    fn product_cost_is_recipe_sum() {
        let lines = vec![
            RecipeLine::from_ingredient(&ingredient("a", 4000.0), 0.5),
            RecipeLine::from_ingredient(&ingredient("b", 1000.0), 2.0),
        ];
        let mut product = Product {
            id: String::new(),
            name: "Taco mixto".into(),
            category: Category::Taco,
            description: None,
            price: 8000.0,
            recipe: lines,
            total_cost: 0.0,
        };

        product.recompute_cost();
        assert_eq!(product.total_cost, 4000.0);
    }

    #[test]
    fn costing_preview() {
        let lines = vec![RecipeLine::from_ingredient(&ingredient("a", 2000.0), 1.5)];

        let costing = ProductCosting::of(6000.0, &lines);
        assert_eq!(costing.total_cost, 3000.0);
        assert_eq!(costing.net_profit, 3000.0);
        assert_eq!(costing.profit_margin, 50.0);
    }

    #[test]
    fn costing_margin_zero_without_price() {
        let costing = ProductCosting::of(0.0, &[]);
        assert_eq!(costing.profit_margin, 0.0);
    }
}
