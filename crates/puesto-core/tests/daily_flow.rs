//! Pure end-to-end flow: author products over ingredients, sell through
//! the cart, and derive the daily summary - no store, no I/O.

use puesto_core::{
    compute_daily_summary, Cart, Category, ExpenseDraft, Ingredient, Product, ProductCosting,
    RecipeLine,
};

fn ingredient(id: &str, name: &str, unit: &str, unit_cost: f64, stock: f64, min: f64) -> Ingredient {
    Ingredient {
        id: id.into(),
        name: name.into(),
        unit: unit.into(),
        unit_cost,
        stock,
        min_stock: min,
    }
}

#[test]
fn a_full_day_of_business() {
    // Catalog
    let tortilla = ingredient("i-tortilla", "Tortilla", "unidad", 300.0, 40.0, 20.0);
    let carne = ingredient("i-carne", "Carne", "kg", 20000.0, 2.0, 3.0); // already low

    let mut taco = Product {
        id: "p-taco".into(),
        name: "Taco de carne".into(),
        category: Category::Taco,
        description: Some("Con todo".into()),
        price: 5000.0,
        recipe: vec![
            RecipeLine::from_ingredient(&tortilla, 2.0),
            RecipeLine::from_ingredient(&carne, 0.1),
        ],
        total_cost: 0.0,
    };
    taco.recompute_cost();
    assert_eq!(taco.total_cost, 2.0 * 300.0 + 0.1 * 20000.0); // 2600

    // The authoring preview agrees with the saved cost
    let costing = ProductCosting::of(taco.price, &taco.recipe);
    assert_eq!(costing.total_cost, taco.total_cost);
    assert_eq!(costing.net_profit, 2400.0);
    assert_eq!(costing.profit_margin, 48.0);

    // Three tacos on one ticket
    let mut cart = Cart::new();
    cart.add(&taco);
    cart.add(&taco);
    cart.add(&taco);
    let sale = cart
        .checkout()
        .unwrap()
        .into_sale("2025-01-01".into(), "13:05:00".into());
    assert_eq!(sale.total, 15000.0);
    assert_eq!(sale.total_cost, 7800.0);
    assert_eq!(sale.profit, 7200.0);

    // One operational expense the same day
    let expense = ExpenseDraft::operational("Gas", 3000.0).into_expense("2025-01-01".into());

    let summary = compute_daily_summary(
        "2025-01-01",
        30000.0,
        &[sale],
        &[expense],
        &[tortilla, carne],
    );

    assert_eq!(summary.starting_cash, 30000.0);
    assert_eq!(summary.total_sales, 15000.0);
    assert_eq!(summary.total_expenses, 3000.0);
    assert_eq!(summary.net_profit, 12000.0);
    assert_eq!(summary.profit_margin, 80.0);
    assert_eq!(summary.avg_unit_cost, 2600.0);
    assert_eq!(summary.sales.len(), 1);
    assert_eq!(summary.expenses.len(), 1);

    // Only the ingredient at or below its minimum alerts
    assert_eq!(
        summary.inventory_alerts,
        vec!["Carne está por debajo del nivel mínimo (2 kg)".to_string()]
    );
}

#[test]
fn summaries_only_see_the_selected_date() {
    let sale_day_one = {
        let mut cart = Cart::new();
        cart.add(&Product {
            id: "p-1".into(),
            name: "Arepa".into(),
            category: Category::Arepa,
            description: None,
            price: 4000.0,
            recipe: Vec::new(),
            total_cost: 1200.0,
        });
        cart.checkout()
            .unwrap()
            .into_sale("2025-01-01".into(), "09:00:00".into())
    };

    let summary = compute_daily_summary("2025-01-02", 0.0, &[sale_day_one], &[], &[]);

    assert!(summary.sales.is_empty());
    assert_eq!(summary.total_sales, 0.0);
    assert_eq!(summary.profit_margin, 0.0);
}
