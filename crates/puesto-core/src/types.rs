//! # Domain Types
//!
//! Core domain types used throughout Puesto.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Ingredient    │   │    Product      │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (key)       │   │  id (key)       │   │  id (key)       │       │
//! │  │  name, unit     │◄──│  recipe:        │◄──│  items:         │       │
//! │  │  unit_cost      │   │  [RecipeLine]   │   │  [SoldItem]     │       │
//! │  │  stock/min      │   │  price, cost    │   │  total, profit  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  RecipeLine and SoldItem are FROZEN snapshots: later edits to the      │
//! │  referenced ingredient/product never rewrite historical records.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The remote document store keeps Spanish field names
//! (`nombre`, `costoTotal`, ...) so existing data stays readable; every
//! struct maps them via `#[serde(rename)]`. Record ids are the store's
//! generated keys: they are never serialized back, and the snapshot decoder
//! injects them after deserialization via [`Keyed`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Keyed Records
// =============================================================================

/// A record keyed by a store-generated identifier.
///
/// The remote store keeps fields-without-id under a generated key; the
/// snapshot decoder copies that key into the record after deserialization.
pub trait Keyed {
    /// Returns the record's identifier (empty for unsaved drafts).
    fn id(&self) -> &str;

    /// Sets the record's identifier from the remote key.
    fn set_id(&mut self, id: String);
}

macro_rules! impl_keyed {
    ($($ty:ty),+) => {
        $(impl Keyed for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        })+
    };
}

// =============================================================================
// Ingredient
// =============================================================================

/// A raw ingredient tracked in inventory.
///
/// `stock` is mutated by sale processing and direct edits. No floor is
/// enforced: selling more than available drives it negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ingredient {
    /// Store-generated key. Never serialized back to the remote store.
    #[serde(default, skip_serializing)]
    pub id: String,

    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Unit of measure ("kg", "l", "unidad", ...).
    #[serde(rename = "unidadMedida")]
    pub unit: String,

    /// Cost per unit of measure.
    #[serde(rename = "costoUnitario")]
    pub unit_cost: f64,

    /// Current stock level, in `unit`.
    pub stock: f64,

    /// Minimum stock level before a low-stock alert fires.
    #[serde(rename = "stockMinimo")]
    pub min_stock: f64,
}

impl Ingredient {
    /// Returns true if this ingredient should appear in inventory alerts.
    pub fn is_low(&self) -> bool {
        self.stock <= self.min_stock
    }
}

// =============================================================================
// Recipe Line
// =============================================================================

/// One ingredient as used inside a product definition.
///
/// A frozen copy of the ingredient's cost at authoring time: changing the
/// ingredient afterwards does not reprice existing products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecipeLine {
    /// Key of the referenced [`Ingredient`].
    #[serde(rename = "ingredienteId")]
    pub ingredient_id: String,

    /// Ingredient name at authoring time (frozen).
    #[serde(rename = "nombre")]
    pub name: String,

    /// Quantity of the ingredient per product unit.
    #[serde(rename = "cantidad")]
    pub quantity: f64,

    /// Unit of measure at authoring time (frozen).
    #[serde(rename = "unidadMedida")]
    pub unit: String,

    /// Unit cost at authoring time (frozen).
    #[serde(rename = "costoUnitario")]
    pub unit_cost: f64,

    /// Line cost: `quantity × unit_cost`.
    #[serde(rename = "costoTotal")]
    pub line_cost: f64,
}

// =============================================================================
// Product
// =============================================================================

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    #[default]
    #[serde(rename = "taco")]
    Taco,
    #[serde(rename = "arepa")]
    Arepa,
    #[serde(rename = "bebida")]
    Beverage,
    #[serde(rename = "otro")]
    Other,
}

/// A product available for sale, priced over a recipe of ingredients.
///
/// ## Invariant
/// `total_cost` must equal the sum of the recipe's line costs at time of
/// save. The caller recomputes it before every save (see
/// [`Product::recompute_cost`]); the store does not re-validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Store-generated key. Never serialized back to the remote store.
    #[serde(default, skip_serializing)]
    pub id: String,

    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "categoria")]
    pub category: Category,

    /// Optional free-form description.
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sale price per unit.
    #[serde(rename = "precio")]
    pub price: f64,

    /// Frozen ingredient snapshots making up one unit of this product.
    #[serde(rename = "ingredientes", default)]
    pub recipe: Vec<RecipeLine>,

    /// Ingredient cost per unit: the sum of the recipe's line costs.
    #[serde(rename = "costoTotal")]
    pub total_cost: f64,
}

// =============================================================================
// Sale
// =============================================================================

/// One product's price/cost/quantity as sold inside a sale record.
///
/// Uses the snapshot pattern: unit price and unit cost are frozen at the
/// moment the product enters the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SoldItem {
    /// Key of the referenced [`Product`].
    #[serde(rename = "productoId")]
    pub product_id: String,

    /// Product name at time of sale (frozen).
    #[serde(rename = "nombre")]
    pub name: String,

    /// Units sold.
    #[serde(rename = "cantidad")]
    pub quantity: f64,

    /// Unit price at time of sale (frozen).
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,

    /// Line total: `unit_price × quantity`.
    #[serde(rename = "total")]
    pub line_total: f64,

    /// Ingredient cost per unit at time of sale (frozen).
    #[serde(rename = "costoUnitario")]
    pub unit_cost: f64,

    /// Line cost: `unit_cost × quantity`.
    #[serde(rename = "costoTotal")]
    pub line_cost: f64,
}

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Store-generated key. Never serialized back to the remote store.
    #[serde(default, skip_serializing)]
    pub id: String,

    /// Business date, `YYYY-MM-DD`. Stamped by the store at registration.
    #[serde(rename = "fecha")]
    pub date: String,

    /// Local wall-clock time, `HH:MM:SS`. Stamped by the store.
    #[serde(rename = "hora")]
    pub time: String,

    /// The sold line items.
    #[serde(rename = "productos")]
    pub items: Vec<SoldItem>,

    pub total: f64,

    #[serde(rename = "costoTotal")]
    pub total_cost: f64,

    /// `total - total_cost`, by construction.
    #[serde(rename = "ganancia")]
    pub profit: f64,
}

/// A sale as submitted for registration: no id, date, or time yet.
///
/// The store stamps the selected date and the current local time when the
/// draft is registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleDraft {
    #[serde(rename = "productos")]
    pub items: Vec<SoldItem>,

    pub total: f64,

    #[serde(rename = "costoTotal")]
    pub total_cost: f64,

    #[serde(rename = "ganancia")]
    pub profit: f64,
}

impl SaleDraft {
    /// Completes the draft into a full [`Sale`] with the given stamps.
    pub fn into_sale(self, date: String, time: String) -> Sale {
        Sale {
            id: String::new(),
            date,
            time,
            items: self.items,
            total: self.total,
            total_cost: self.total_cost,
            profit: self.profit,
        }
    }
}

// =============================================================================
// Expense
// =============================================================================

/// Expense classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ExpenseKind {
    /// Purchase of a tracked ingredient.
    #[serde(rename = "ingrediente")]
    IngredientPurchase,
    /// Operational cost (gas, rent, supplies, ...).
    #[serde(rename = "operativo")]
    Operational,
}

/// A recorded expense.
///
/// `quantity` is zero for operational expenses; `unit` and `ingredient_id`
/// are present only for ingredient purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Expense {
    /// Store-generated key. Never serialized back to the remote store.
    #[serde(default, skip_serializing)]
    pub id: String,

    /// Business date, `YYYY-MM-DD`. Stamped by the store at registration.
    #[serde(rename = "fecha")]
    pub date: String,

    #[serde(rename = "descripcion")]
    pub description: String,

    /// Purchased quantity. `0.0` for operational expenses.
    #[serde(rename = "cantidad", default)]
    pub quantity: f64,

    /// Unit of measure of the purchased ingredient.
    #[serde(rename = "unidadMedida", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(rename = "costoTotal")]
    pub total_cost: f64,

    #[serde(rename = "tipo")]
    pub kind: ExpenseKind,

    /// Key of the purchased [`Ingredient`].
    #[serde(rename = "ingredienteId", default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<String>,
}

/// An expense as submitted for registration: no id or date yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseDraft {
    #[serde(rename = "descripcion")]
    pub description: String,

    #[serde(rename = "cantidad", default)]
    pub quantity: f64,

    #[serde(rename = "unidadMedida", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(rename = "costoTotal")]
    pub total_cost: f64,

    #[serde(rename = "tipo")]
    pub kind: ExpenseKind,

    #[serde(rename = "ingredienteId", default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<String>,
}

impl ExpenseDraft {
    /// Builds an operational expense draft (no ingredient linkage).
    pub fn operational(description: impl Into<String>, total_cost: f64) -> Self {
        ExpenseDraft {
            description: description.into(),
            quantity: 0.0,
            unit: None,
            total_cost,
            kind: ExpenseKind::Operational,
            ingredient_id: None,
        }
    }

    /// Builds an ingredient-purchase draft, taking the unit of measure from
    /// the purchased ingredient.
    pub fn ingredient_purchase(
        description: impl Into<String>,
        ingredient: &Ingredient,
        quantity: f64,
        total_cost: f64,
    ) -> Self {
        ExpenseDraft {
            description: description.into(),
            quantity,
            unit: Some(ingredient.unit.clone()),
            total_cost,
            kind: ExpenseKind::IngredientPurchase,
            ingredient_id: Some(ingredient.id.clone()),
        }
    }

    /// Completes the draft into a full [`Expense`] with the given date.
    pub fn into_expense(self, date: String) -> Expense {
        Expense {
            id: String::new(),
            date,
            description: self.description,
            quantity: self.quantity,
            unit: self.unit,
            total_cost: self.total_cost,
            kind: self.kind,
            ingredient_id: self.ingredient_id,
        }
    }
}

// =============================================================================
// Daily Summary
// =============================================================================

/// The derived financial summary for one selected date.
///
/// Fully derived: recomputed by the store after every relevant change,
/// never mutated directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySummary {
    #[serde(rename = "fecha")]
    pub date: String,

    #[serde(rename = "dineroInicial")]
    pub starting_cash: f64,

    #[serde(rename = "ventasTotales")]
    pub total_sales: f64,

    #[serde(rename = "gastosTotales")]
    pub total_expenses: f64,

    /// `total_sales - total_expenses`.
    #[serde(rename = "gananciaNeta")]
    pub net_profit: f64,

    /// `net_profit / total_sales × 100`, or `0` on a zero-sales day.
    #[serde(rename = "margenGanancia")]
    pub profit_margin: f64,

    /// Day cost of goods sold divided by units sold, or `0` when nothing
    /// was sold.
    #[serde(rename = "costoPromedioProducto")]
    pub avg_unit_cost: f64,

    /// The day's sales.
    #[serde(rename = "ventas")]
    pub sales: Vec<Sale>,

    /// The day's expenses.
    #[serde(rename = "gastos")]
    pub expenses: Vec<Expense>,

    /// One formatted alert per ingredient at or below its minimum stock.
    #[serde(rename = "alertasInventario")]
    pub inventory_alerts: Vec<String>,
}

impl DailySummary {
    /// The all-zero summary shown before the first remote snapshot arrives.
    pub fn empty(date: impl Into<String>) -> Self {
        DailySummary {
            date: date.into(),
            starting_cash: 0.0,
            total_sales: 0.0,
            total_expenses: 0.0,
            net_profit: 0.0,
            profit_margin: 0.0,
            avg_unit_cost: 0.0,
            sales: Vec::new(),
            expenses: Vec::new(),
            inventory_alerts: Vec::new(),
        }
    }
}

// =============================================================================
// View
// =============================================================================

/// The dashboard view currently shown by the presentation layer.
///
/// Carried by the store for convenience; switching views has no effect on
/// synchronization or derived metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum View {
    #[default]
    #[serde(rename = "resumen")]
    Summary,
    #[serde(rename = "venta")]
    Sale,
    #[serde(rename = "gasto")]
    Expense,
    #[serde(rename = "inventario")]
    Inventory,
    #[serde(rename = "productos")]
    Products,
}

impl_keyed!(Ingredient, Product, Sale, Expense);

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_wire_names_round_trip() {
        let json = serde_json::json!({
            "nombre": "Harina de maíz",
            "unidadMedida": "kg",
            "costoUnitario": 4200.0,
            "stock": 12.5,
            "stockMinimo": 5.0,
        });

        let mut ing: Ingredient = serde_json::from_value(json).unwrap();
        assert_eq!(ing.id, ""); // id comes from the remote key, not the fields
        ing.set_id("abc-123".into());
        assert_eq!(ing.name, "Harina de maíz");
        assert_eq!(ing.stock, 12.5);

        // id never travels back to the remote store
        let out = serde_json::to_value(&ing).unwrap();
        assert!(out.get("id").is_none());
        assert_eq!(out["unidadMedida"], "kg");
    }

    #[test]
    fn category_uses_spanish_wire_values() {
        assert_eq!(
            serde_json::to_value(Category::Beverage).unwrap(),
            serde_json::json!("bebida")
        );
        let cat: Category = serde_json::from_value(serde_json::json!("otro")).unwrap();
        assert_eq!(cat, Category::Other);
    }

    #[test]
    fn expense_optional_fields_only_serialized_when_present() {
        let op = ExpenseDraft::operational("Gas", 15000.0);
        let out = serde_json::to_value(&op).unwrap();
        assert!(out.get("unidadMedida").is_none());
        assert!(out.get("ingredienteId").is_none());
        assert_eq!(out["cantidad"], 0.0);
        assert_eq!(out["tipo"], "operativo");

        let ing = Ingredient {
            id: "ing-1".into(),
            name: "Queso".into(),
            unit: "kg".into(),
            unit_cost: 18000.0,
            stock: 3.0,
            min_stock: 1.0,
        };
        let buy = ExpenseDraft::ingredient_purchase("Compra queso", &ing, 2.0, 36000.0);
        let out = serde_json::to_value(&buy).unwrap();
        assert_eq!(out["unidadMedida"], "kg");
        assert_eq!(out["ingredienteId"], "ing-1");
        assert_eq!(out["tipo"], "ingrediente");
    }

    #[test]
    fn sale_draft_stamping() {
        let draft = SaleDraft {
            items: vec![],
            total: 10000.0,
            total_cost: 6000.0,
            profit: 4000.0,
        };
        let sale = draft.into_sale("2025-01-01".into(), "12:30:00".into());
        assert_eq!(sale.id, "");
        assert_eq!(sale.date, "2025-01-01");
        assert_eq!(sale.time, "12:30:00");
        assert_eq!(sale.profit, 4000.0);
    }

    #[test]
    fn view_default_is_summary() {
        assert_eq!(View::default(), View::Summary);
        assert_eq!(
            serde_json::to_value(View::default()).unwrap(),
            serde_json::json!("resumen")
        );
    }
}
