//! # Validation Module
//!
//! Form-level validation for records about to be written to the remote
//! store. The synchronization store itself never validates - malformed
//! numeric input is already defaulted to zero by the form layer, and these
//! checks are the last gate before a write is issued.

use crate::error::ValidationError;
use crate::types::{Expense, ExpenseDraft, ExpenseKind, Ingredient, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

fn require_positive(field: &str, value: f64) -> ValidationResult<()> {
    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a product before save.
///
/// ## Rules
/// - `nombre` must not be empty
/// - `precio` must be positive
/// - the recipe must have at least one line
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    require("nombre", &product.name)?;
    require_positive("precio", product.price)?;

    if product.recipe.is_empty() {
        return Err(ValidationError::EmptyRecipe);
    }

    Ok(())
}

/// Validates an ingredient before save.
///
/// ## Rules
/// - `nombre` and `unidadMedida` must not be empty
/// - `costoUnitario` must be positive
///
/// Stock levels are deliberately unchecked: zero and negative stock are
/// legal states.
pub fn validate_ingredient(ingredient: &Ingredient) -> ValidationResult<()> {
    require("nombre", &ingredient.name)?;
    require("unidadMedida", &ingredient.unit)?;
    require_positive("costoUnitario", ingredient.unit_cost)?;

    Ok(())
}

/// Validates an expense draft before registration.
///
/// ## Rules
/// - `descripcion` must not be empty
/// - `costoTotal` must be positive
/// - ingredient purchases additionally need an ingredient reference and a
///   positive quantity
pub fn validate_expense_draft(draft: &ExpenseDraft) -> ValidationResult<()> {
    require("descripcion", &draft.description)?;
    require_positive("costoTotal", draft.total_cost)?;

    if draft.kind == ExpenseKind::IngredientPurchase {
        match draft.ingredient_id.as_deref() {
            Some(id) if !id.trim().is_empty() => {}
            _ => {
                return Err(ValidationError::Required {
                    field: "ingredienteId".to_string(),
                })
            }
        }
        require_positive("cantidad", draft.quantity)?;
    }

    Ok(())
}

/// Validates a full expense (same rules as the draft).
pub fn validate_expense(expense: &Expense) -> ValidationResult<()> {
    validate_expense_draft(&ExpenseDraft {
        description: expense.description.clone(),
        quantity: expense.quantity,
        unit: expense.unit.clone(),
        total_cost: expense.total_cost,
        kind: expense.kind,
        ingredient_id: expense.ingredient_id.clone(),
    })
}

/// Validates a business date in strict `YYYY-MM-DD` form.
pub fn validate_date(date: &str) -> ValidationResult<()> {
    let bytes = date.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && date
            .char_indices()
            .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit());

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "fecha".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, RecipeLine};

    fn ingredient() -> Ingredient {
        Ingredient {
            id: "ing-1".into(),
            name: "Queso".into(),
            unit: "kg".into(),
            unit_cost: 18000.0,
            stock: 3.0,
            min_stock: 1.0,
        }
    }

    fn product() -> Product {
        Product {
            id: String::new(),
            name: "Arepa de queso".into(),
            category: Category::Arepa,
            description: None,
            price: 6000.0,
            recipe: vec![RecipeLine::from_ingredient(&ingredient(), 0.1)],
            total_cost: 1800.0,
        }
    }

    #[test]
    fn valid_records_pass() {
        assert!(validate_product(&product()).is_ok());
        assert!(validate_ingredient(&ingredient()).is_ok());
        assert!(
            validate_expense_draft(&ExpenseDraft::operational("Gas", 15000.0)).is_ok()
        );
    }

    #[test]
    fn product_requires_name_price_and_recipe() {
        let mut p = product();
        p.name = "  ".into();
        assert!(validate_product(&p).is_err());

        let mut p = product();
        p.price = 0.0;
        assert!(validate_product(&p).is_err());

        let mut p = product();
        p.recipe.clear();
        assert!(matches!(
            validate_product(&p),
            Err(ValidationError::EmptyRecipe)
        ));
    }

    #[test]
    fn ingredient_allows_zero_and_negative_stock() {
        let mut i = ingredient();
        i.stock = 0.0;
        assert!(validate_ingredient(&i).is_ok());
        i.stock = -4.0;
        assert!(validate_ingredient(&i).is_ok());
    }

    #[test]
    fn ingredient_purchase_needs_reference_and_quantity() {
        let mut draft = ExpenseDraft::ingredient_purchase("Compra", &ingredient(), 2.0, 36000.0);
        assert!(validate_expense_draft(&draft).is_ok());

        draft.ingredient_id = None;
        assert!(validate_expense_draft(&draft).is_err());

        let mut draft = ExpenseDraft::ingredient_purchase("Compra", &ingredient(), 0.0, 36000.0);
        draft.quantity = 0.0;
        assert!(validate_expense_draft(&draft).is_err());
    }

    #[test]
    fn date_format_is_strict() {
        assert!(validate_date("2025-01-31").is_ok());
        assert!(validate_date("2025-1-31").is_err());
        assert!(validate_date("31/01/2025").is_err());
        assert!(validate_date("2025-01-31T00:00").is_err());
    }
}
