//! # Synchronization Store
//!
//! Maintains the authoritative local mirror of the five remote data sources
//! and serializes every write through the remote store.
//!
//! ## Store Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SyncStore Architecture                             │
//! │                                                                         │
//! │  remote listeners (one forwarder task per path)                         │
//! │  productos ──► decode ──┐                                              │
//! │  ingredientes ► decode ─┤                                              │
//! │  ventas ─────► decode ──┼── StoreEvent ──┐                             │
//! │  gastos ─────► decode ──┤                │                             │
//! │  dineroInicial ► decode ┘                ▼                             │
//! │                                 ┌──────────────────┐    watch          │
//! │  StoreHandle ── StoreCommand ──►│  event loop      │──► AppState ──►   │
//! │  (presentation)                 │  owns AppState   │    (readers)      │
//! │                                 │  recompute after │                   │
//! │                                 │  every change    │                   │
//! │                                 └────────┬─────────┘                   │
//! │                                          │ fire-and-forget writes      │
//! │                                          ▼                             │
//! │                                    RemoteHandle                        │
//! │                                                                         │
//! │  MUTATIONS NEVER TOUCH THE MIRROR: every visible effect arrives        │
//! │  through the listener round-trip (eventual consistency).               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency Model
//! Events and commands drain through one `tokio::select!` loop, so the
//! mirror is replaced atomically (whole-collection swap) and readers never
//! observe a partial collection. Readers may observe an arbitrarily stale
//! mirror between the moment a mutation is issued and the moment its
//! resulting notification arrives. Writes that fail are logged by the
//! driver and simply never produce a notification - no retries, no
//! timeouts, no error results.

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use puesto_core::{
    compute_daily_summary, Expense, ExpenseDraft, Ingredient, Keyed, Product, Sale, SaleDraft,
    View,
};

use crate::config::StoreConfig;
use crate::remote::{paths, RemoteHandle, Snapshot};
use crate::snapshot::{decode_collection, decode_scalar_f64};
use crate::state::AppState;

/// Business-date format stamped onto sales and expenses.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wall-clock format stamped onto sales.
const TIME_FORMAT: &str = "%H:%M:%S";

// =============================================================================
// Events & Commands
// =============================================================================

/// A decoded remote notification: the new full content of one data source.
#[derive(Debug)]
enum StoreEvent {
    Products(Vec<Product>),
    Ingredients(Vec<Ingredient>),
    Sales(Vec<Sale>),
    Expenses(Vec<Expense>),
    StartingCash(f64),
}

/// A mutation or selection request from the presentation layer.
#[derive(Debug)]
enum StoreCommand {
    SelectDate(String),
    SetView(View),
    SetStartingCash(f64),

    AddProduct(Product),
    UpdateProduct { id: String, product: Product },
    DeleteProduct(String),

    AddIngredient(Ingredient),
    UpdateIngredient { id: String, ingredient: Ingredient },
    DeleteIngredient(String),
    AdjustIngredientStock { id: String, delta: f64 },

    RegisterSale(SaleDraft),
    UpdateSale { id: String, sale: Sale },
    DeleteSale(String),

    RegisterExpense(ExpenseDraft),
    UpdateExpense { id: String, expense: Expense },
    DeleteExpense(String),
}

// =============================================================================
// Sync Store
// =============================================================================

/// The synchronization store's event loop state.
pub struct SyncStore {
    state: AppState,
    remote: RemoteHandle,
    events_rx: mpsc::Receiver<StoreEvent>,
    commands_rx: mpsc::Receiver<StoreCommand>,
    state_tx: watch::Sender<AppState>,
}

impl SyncStore {
    /// Subscribes to the five remote data sources and spawns the event
    /// loop, focused on today's date.
    ///
    /// Listeners remain active for the process lifetime; there is no
    /// unsubscribe path in normal operation.
    pub async fn spawn(remote: RemoteHandle, config: &StoreConfig) -> StoreHandle {
        let today = Local::now().format(DATE_FORMAT).to_string();
        Self::spawn_at(remote, config, today).await
    }

    /// Like [`SyncStore::spawn`], but focused on an explicit initial date.
    pub async fn spawn_at(
        remote: RemoteHandle,
        config: &StoreConfig,
        date: impl Into<String>,
    ) -> StoreHandle {
        let (events_tx, events_rx) = mpsc::channel(config.store.event_buffer);
        let (commands_tx, commands_rx) = mpsc::channel(config.store.command_buffer);

        let state = AppState::for_date(date);
        let (state_tx, state_rx) = watch::channel(state.clone());

        subscribe_all(&remote, &events_tx).await;

        let store = SyncStore {
            state,
            remote,
            events_rx,
            commands_rx,
            state_tx,
        };
        tokio::spawn(store.run());

        StoreHandle {
            commands_tx,
            state_rx,
        }
    }

    /// Runs the event loop until both the listeners and every handle are
    /// gone.
    async fn run(mut self) {
        info!("Synchronization store starting");

        loop {
            tokio::select! {
                Some(event) = self.events_rx.recv() => self.apply_event(event),
                Some(command) = self.commands_rx.recv() => self.handle_command(command).await,
                else => break,
            }

            // Publish after every change; watch keeps only the latest state
            self.state_tx.send_replace(self.state.clone());
        }

        info!("Synchronization store stopped");
    }

    /// Replaces the corresponding local collection/scalar wholesale, then
    /// recomputes the summary for the selected date.
    fn apply_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Products(products) => self.state.products = products,
            StoreEvent::Ingredients(ingredients) => self.state.ingredients = ingredients,
            StoreEvent::Sales(sales) => self.state.sales = sales,
            StoreEvent::Expenses(expenses) => self.state.expenses = expenses,
            StoreEvent::StartingCash(amount) => self.state.starting_cash = amount,
        }

        self.recompute();
    }

    fn recompute(&mut self) {
        self.state.daily_summary = compute_daily_summary(
            &self.state.selected_date,
            self.state.starting_cash,
            &self.state.sales,
            &self.state.expenses,
            &self.state.ingredients,
        );
    }

    async fn handle_command(&mut self, command: StoreCommand) {
        match command {
            StoreCommand::SelectDate(date) => {
                self.state.selected_date = date;
                // Recomputed against the current mirror - before the first
                // snapshot arrives this yields the all-zero summary
                self.recompute();
            }

            StoreCommand::SetView(view) => self.state.current_view = view,

            StoreCommand::SetStartingCash(amount) => {
                // Local value updates only once the listener fires
                self.remote.overwrite(paths::STARTING_CASH, json!(amount)).await;
            }

            StoreCommand::AddProduct(product) => self.create(paths::PRODUCTS, &product).await,
            StoreCommand::UpdateProduct { id, product } => {
                self.overwrite_record(paths::PRODUCTS, &id, &product).await;
            }
            StoreCommand::DeleteProduct(id) => {
                self.remote.delete(&format!("{}/{id}", paths::PRODUCTS)).await;
            }

            StoreCommand::AddIngredient(ingredient) => {
                self.create(paths::INGREDIENTS, &ingredient).await;
            }
            StoreCommand::UpdateIngredient { id, ingredient } => {
                self.overwrite_record(paths::INGREDIENTS, &id, &ingredient).await;
            }
            StoreCommand::DeleteIngredient(id) => {
                self.remote
                    .delete(&format!("{}/{id}", paths::INGREDIENTS))
                    .await;
            }
            StoreCommand::AdjustIngredientStock { id, delta } => {
                self.adjust_ingredient_stock(&id, delta).await;
            }

            StoreCommand::RegisterSale(draft) => self.register_sale(draft).await,
            StoreCommand::UpdateSale { id, sale } => {
                // No compensating stock adjustment: editing a sale does not
                // reverse or reapply the deltas applied at registration
                self.overwrite_record(paths::SALES, &id, &sale).await;
            }
            StoreCommand::DeleteSale(id) => {
                // Same documented limitation as UpdateSale
                self.remote.delete(&format!("{}/{id}", paths::SALES)).await;
            }

            StoreCommand::RegisterExpense(draft) => {
                let expense = draft.into_expense(self.state.selected_date.clone());
                self.create(paths::EXPENSES, &expense).await;
            }
            StoreCommand::UpdateExpense { id, expense } => {
                self.overwrite_record(paths::EXPENSES, &id, &expense).await;
            }
            StoreCommand::DeleteExpense(id) => {
                self.remote.delete(&format!("{}/{id}", paths::EXPENSES)).await;
            }
        }
    }

    /// Stamps the selected date and the current local time onto the draft,
    /// records the sale, and issues one independent stock decrement per
    /// recipe line of every sold item.
    ///
    /// The per-ingredient writes are unordered with respect to each other
    /// and to the sale write itself; partial failure leaves the sale
    /// recorded with stock partially or not decremented.
    async fn register_sale(&self, draft: SaleDraft) {
        let date = self.state.selected_date.clone();
        let time = Local::now().format(TIME_FORMAT).to_string();
        let sale = draft.into_sale(date, time);

        self.create(paths::SALES, &sale).await;

        for item in &sale.items {
            let Some(product) = self.state.product(&item.product_id) else {
                debug!(
                    product_id = %item.product_id,
                    "Sold product not in local mirror, skipping stock adjustment"
                );
                continue;
            };

            for line in &product.recipe {
                let used = line.quantity * item.quantity;
                self.adjust_ingredient_stock(&line.ingredient_id, -used).await;
            }
        }
    }

    /// Reads the current *local* stock and writes `stock + delta` to the
    /// ingredient's stock field only. Unknown ingredients are a logged
    /// no-op.
    async fn adjust_ingredient_stock(&self, id: &str, delta: f64) {
        let Some(ingredient) = self.state.ingredient(id) else {
            warn!(
                ingredient_id = %id,
                "Ingredient not found in local mirror for stock update"
            );
            return;
        };

        let path = format!("{}/{id}/stock", paths::INGREDIENTS);
        self.remote.overwrite(&path, json!(ingredient.stock + delta)).await;
    }

    async fn create<T: Serialize>(&self, path: &str, record: &T) {
        match serde_json::to_value(record) {
            Ok(fields) => self.remote.create(path, fields).await,
            Err(error) => warn!(%path, %error, "Dropping create: record failed to serialize"),
        }
    }

    async fn overwrite_record<T: Serialize>(&self, path: &str, id: &str, record: &T) {
        match serde_json::to_value(record) {
            Ok(value) => self.remote.overwrite(&format!("{path}/{id}"), value).await,
            Err(error) => warn!(%path, %id, %error, "Dropping update: record failed to serialize"),
        }
    }
}

/// Registers the five persistent listeners, each with a forwarder task
/// that decodes snapshots into typed events.
async fn subscribe_all(remote: &RemoteHandle, events_tx: &mpsc::Sender<StoreEvent>) {
    forward_collection(
        paths::PRODUCTS,
        remote.subscribe(paths::PRODUCTS).await,
        events_tx.clone(),
        StoreEvent::Products,
    );
    forward_collection(
        paths::INGREDIENTS,
        remote.subscribe(paths::INGREDIENTS).await,
        events_tx.clone(),
        StoreEvent::Ingredients,
    );
    forward_collection(
        paths::SALES,
        remote.subscribe(paths::SALES).await,
        events_tx.clone(),
        StoreEvent::Sales,
    );
    forward_collection(
        paths::EXPENSES,
        remote.subscribe(paths::EXPENSES).await,
        events_tx.clone(),
        StoreEvent::Expenses,
    );

    let mut snapshots = remote.subscribe(paths::STARTING_CASH).await;
    let events_tx = events_tx.clone();
    tokio::spawn(async move {
        while let Some(snapshot) = snapshots.recv().await {
            let amount = decode_scalar_f64(paths::STARTING_CASH, snapshot);
            if events_tx.send(StoreEvent::StartingCash(amount)).await.is_err() {
                break;
            }
        }
    });
}

fn forward_collection<T>(
    path: &'static str,
    mut snapshots: mpsc::Receiver<Snapshot>,
    events_tx: mpsc::Sender<StoreEvent>,
    wrap: fn(Vec<T>) -> StoreEvent,
) where
    T: Keyed + DeserializeOwned + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(snapshot) = snapshots.recv().await {
            let records = decode_collection(path, snapshot);
            if events_tx.send(wrap(records)).await.is_err() {
                break;
            }
        }
    });
}

// =============================================================================
// Store Handle
// =============================================================================

/// The presentation layer's contract with the store: read-only access to
/// the mirrored state and the mutation operations.
///
/// Every mutation returns `()` immediately; completion is observed only via
/// a later state change (eventual consistency, not request/response). A
/// write that never completes simply never updates the mirror.
#[derive(Clone)]
pub struct StoreHandle {
    commands_tx: mpsc::Sender<StoreCommand>,
    state_rx: watch::Receiver<AppState>,
}

impl StoreHandle {
    /// Returns a clone of the current mirrored state.
    pub fn state(&self) -> AppState {
        self.state_rx.borrow().clone()
    }

    /// Returns the current derived daily summary.
    pub fn summary(&self) -> puesto_core::DailySummary {
        self.state_rx.borrow().daily_summary.clone()
    }

    /// Returns a watcher that yields every published state change.
    pub fn watch(&self) -> watch::Receiver<AppState> {
        self.state_rx.clone()
    }

    /// Focuses the dashboard on `date` and recomputes the summary against
    /// the current mirror.
    pub async fn select_date(&self, date: impl Into<String>) {
        self.send(StoreCommand::SelectDate(date.into())).await;
    }

    /// Switches the presentation view. No synchronization effect.
    pub async fn set_view(&self, view: View) {
        self.send(StoreCommand::SetView(view)).await;
    }

    /// Writes the starting-cash scalar to the remote store. The local
    /// value updates once the listener round-trip completes.
    pub async fn set_starting_cash(&self, amount: f64) {
        self.send(StoreCommand::SetStartingCash(amount)).await;
    }

    pub async fn add_product(&self, product: Product) {
        self.send(StoreCommand::AddProduct(product)).await;
    }

    pub async fn update_product(&self, id: impl Into<String>, product: Product) {
        self.send(StoreCommand::UpdateProduct {
            id: id.into(),
            product,
        })
        .await;
    }

    pub async fn delete_product(&self, id: impl Into<String>) {
        self.send(StoreCommand::DeleteProduct(id.into())).await;
    }

    pub async fn add_ingredient(&self, ingredient: Ingredient) {
        self.send(StoreCommand::AddIngredient(ingredient)).await;
    }

    pub async fn update_ingredient(&self, id: impl Into<String>, ingredient: Ingredient) {
        self.send(StoreCommand::UpdateIngredient {
            id: id.into(),
            ingredient,
        })
        .await;
    }

    pub async fn delete_ingredient(&self, id: impl Into<String>) {
        self.send(StoreCommand::DeleteIngredient(id.into())).await;
    }

    /// Adds `delta` (negative to consume) to an ingredient's stock via a
    /// single-field remote write. Unknown ingredients are a logged no-op.
    pub async fn adjust_ingredient_stock(&self, id: impl Into<String>, delta: f64) {
        self.send(StoreCommand::AdjustIngredientStock {
            id: id.into(),
            delta,
        })
        .await;
    }

    /// Registers a sale: stamps the selected date and current local time,
    /// records it remotely, and decrements ingredient stock per the sold
    /// products' recipes.
    pub async fn register_sale(&self, draft: SaleDraft) {
        self.send(StoreCommand::RegisterSale(draft)).await;
    }

    /// Overwrites a sale record. Does NOT adjust ingredient stock.
    pub async fn update_sale(&self, id: impl Into<String>, sale: Sale) {
        self.send(StoreCommand::UpdateSale {
            id: id.into(),
            sale,
        })
        .await;
    }

    /// Deletes a sale record. Does NOT restore ingredient stock.
    pub async fn delete_sale(&self, id: impl Into<String>) {
        self.send(StoreCommand::DeleteSale(id.into())).await;
    }

    /// Registers an expense stamped with the selected date.
    pub async fn register_expense(&self, draft: ExpenseDraft) {
        self.send(StoreCommand::RegisterExpense(draft)).await;
    }

    pub async fn update_expense(&self, id: impl Into<String>, expense: Expense) {
        self.send(StoreCommand::UpdateExpense {
            id: id.into(),
            expense,
        })
        .await;
    }

    pub async fn delete_expense(&self, id: impl Into<String>) {
        self.send(StoreCommand::DeleteExpense(id.into())).await;
    }

    async fn send(&self, command: StoreCommand) {
        if self.commands_tx.send(command).await.is_err() {
            warn!("Synchronization store is gone; dropping command");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRemote;

    fn store_for_test() -> SyncStore {
        let (_events_tx, events_rx) = mpsc::channel(8);
        let (_commands_tx, commands_rx) = mpsc::channel(8);
        let state = AppState::for_date("2025-01-01");
        let (state_tx, _state_rx) = watch::channel(state.clone());

        SyncStore {
            state,
            remote: RemoteHandle::new(mpsc::channel(8).0),
            events_rx,
            commands_rx,
            state_tx,
        }
    }

    fn sale(date: &str, total: f64, total_cost: f64) -> Sale {
        Sale {
            id: "s-1".into(),
            date: date.into(),
            time: "12:00:00".into(),
            items: Vec::new(),
            total,
            total_cost,
            profit: total - total_cost,
        }
    }

    #[tokio::test]
    async fn snapshot_events_replace_collections_and_recompute() {
        let mut store = store_for_test();

        store.apply_event(StoreEvent::Sales(vec![sale("2025-01-01", 10000.0, 6000.0)]));
        assert_eq!(store.state.daily_summary.total_sales, 10000.0);
        assert_eq!(store.state.daily_summary.profit_margin, 100.0);

        // A later notification replaces the collection wholesale
        store.apply_event(StoreEvent::Sales(vec![sale("2025-01-01", 4000.0, 1000.0)]));
        assert_eq!(store.state.sales.len(), 1);
        assert_eq!(store.state.daily_summary.total_sales, 4000.0);
    }

    #[tokio::test]
    async fn starting_cash_event_feeds_summary() {
        let mut store = store_for_test();

        store.apply_event(StoreEvent::StartingCash(50000.0));
        assert_eq!(store.state.starting_cash, 50000.0);
        assert_eq!(store.state.daily_summary.starting_cash, 50000.0);
    }

    #[tokio::test]
    async fn select_date_recomputes_against_current_mirror() {
        let mut store = store_for_test();
        store.apply_event(StoreEvent::Sales(vec![
            sale("2025-01-01", 10000.0, 6000.0),
            sale("2025-01-02", 3000.0, 1000.0),
        ]));

        store
            .handle_command(StoreCommand::SelectDate("2025-01-02".into()))
            .await;

        assert_eq!(store.state.selected_date, "2025-01-02");
        assert_eq!(store.state.daily_summary.total_sales, 3000.0);
    }

    #[tokio::test]
    async fn set_view_does_not_recompute() {
        let mut store = store_for_test();
        store.apply_event(StoreEvent::Sales(vec![sale("2025-01-01", 10000.0, 6000.0)]));
        let before = store.state.daily_summary.clone();

        // Plant fresh mirror data behind the summary's back: a recompute
        // would pick it up, a pure view switch must not
        store.state.sales = vec![sale("2025-01-01", 999.0, 1.0)];
        store.handle_command(StoreCommand::SetView(View::Inventory)).await;

        assert_eq!(store.state.current_view, View::Inventory);
        assert_eq!(store.state.daily_summary, before);
    }

    #[tokio::test]
    async fn spawn_with_memory_remote_starts_empty() {
        let remote = MemoryRemote::spawn();
        let handle = SyncStore::spawn_at(remote, &StoreConfig::default(), "2025-01-01").await;

        let state = handle.state();
        assert!(state.products.is_empty());
        assert_eq!(state.daily_summary.total_sales, 0.0);
    }
}
