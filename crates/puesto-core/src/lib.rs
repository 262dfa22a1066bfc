//! # puesto-core: Pure Business Logic for Puesto
//!
//! This crate is the **heart** of Puesto. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Puesto Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Frontend (TypeScript, external)                │   │
//! │  │    Summary ──► Sale form ──► Expense form ──► Inventory         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ reads state / sends commands           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                puesto-store (Synchronization Store)             │   │
//! │  │    remote mirror • event loop • fire-and-forget writes          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ puesto-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  summary  │  │ cart/     │  │ validation│  │   │
//! │  │   │ Ingredient│  │  Daily    │  │ recipe    │  │   rules   │  │   │
//! │  │   │  Product  │  │  Summary  │  │ snapshots │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Ingredient, Product, Sale, Expense, ...)
//! - [`summary`] - The derived daily-summary calculator
//! - [`recipe`] - Frozen recipe-line snapshots and product costing
//! - [`cart`] - Sale-ticket builder producing frozen sold-item snapshots
//! - [`validation`] - Form-level record validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic - same input =
//!    same output
//! 2. **No I/O**: database, network, clock, file system access is FORBIDDEN
//!    here (date/time stamping belongs to puesto-store)
//! 3. **Frozen Snapshots**: embedded lines (recipe lines, sold items) copy
//!    their source's cost/price at creation time and never change after
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use puesto_core::summary::compute_daily_summary;
//!
//! let summary = compute_daily_summary("2025-01-01", 0.0, &[], &[], &[]);
//!
//! // Before any data arrives every metric is zero
//! assert_eq!(summary.total_sales, 0.0);
//! assert_eq!(summary.profit_margin, 0.0);
//! assert!(summary.inventory_alerts.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod recipe;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use puesto_core::Cart` instead of
// `use puesto_core::cart::Cart`

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use recipe::ProductCosting;
pub use summary::{compute_daily_summary, low_stock_alerts};
pub use types::*;
