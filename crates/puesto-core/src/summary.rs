//! # Daily Summary Calculation
//!
//! The derived-metrics calculator: a pure function from the mirrored
//! collections plus a selected date to a [`DailySummary`].
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   compute_daily_summary(date)                           │
//! │                                                                         │
//! │  sales ──filter by date──► total_sales ─┐                              │
//! │                                         ├─► net_profit ─► margin %     │
//! │  expenses ─filter by date► total_expenses                              │
//! │                                                                         │
//! │  day sales' items ──Σ quantity──► units sold ─┐                        │
//! │  day sales ──Σ total_cost──► day COGS ────────┴─► avg unit cost        │
//! │                                                                         │
//! │  ingredients ──stock <= min──► inventory alert strings                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No state, no side effects, total over well-typed inputs: calling it twice
//! with an unchanged mirror produces an identical summary.

use crate::types::{DailySummary, Expense, Ingredient, Sale};

/// Computes the daily summary for `date` from the current mirror contents.
///
/// ## Rules
/// - Only sales/expenses whose stored date equals `date` participate.
/// - `profit_margin` is `0` on a zero-sales day (never a division by zero).
/// - `avg_unit_cost` is `0` when no units were sold, regardless of expenses.
/// - The day's sales and expenses are embedded in the summary for rendering.
pub fn compute_daily_summary(
    date: &str,
    starting_cash: f64,
    sales: &[Sale],
    expenses: &[Expense],
    ingredients: &[Ingredient],
) -> DailySummary {
    let day_sales: Vec<Sale> = sales.iter().filter(|s| s.date == date).cloned().collect();
    let day_expenses: Vec<Expense> = expenses.iter().filter(|e| e.date == date).cloned().collect();

    let total_sales: f64 = day_sales.iter().map(|s| s.total).sum();
    let total_expenses: f64 = day_expenses.iter().map(|e| e.total_cost).sum();
    let net_profit = total_sales - total_expenses;
    let profit_margin = if total_sales > 0.0 {
        net_profit / total_sales * 100.0
    } else {
        0.0
    };

    let units_sold: f64 = day_sales
        .iter()
        .flat_map(|s| s.items.iter())
        .map(|item| item.quantity)
        .sum();
    let day_cost: f64 = day_sales.iter().map(|s| s.total_cost).sum();
    let avg_unit_cost = if units_sold > 0.0 {
        day_cost / units_sold
    } else {
        0.0
    };

    DailySummary {
        date: date.to_string(),
        starting_cash,
        total_sales,
        total_expenses,
        net_profit,
        profit_margin,
        avg_unit_cost,
        sales: day_sales,
        expenses: day_expenses,
        inventory_alerts: low_stock_alerts(ingredients),
    }
}

/// Returns one formatted alert per ingredient with `stock <= min_stock`,
/// in mirror iteration order.
pub fn low_stock_alerts(ingredients: &[Ingredient]) -> Vec<String> {
    ingredients
        .iter()
        .filter(|i| i.is_low())
        .map(|i| {
            format!(
                "{} está por debajo del nivel mínimo ({} {})",
                i.name, i.stock, i.unit
            )
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
