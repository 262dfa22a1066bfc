//! # puesto-store: Synchronization Store for Puesto
//!
//! This crate mirrors the remote document store into local memory, keeps
//! the derived daily summary current, and forwards local mutations back to
//! the remote store optimistically.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Puesto Sync Layer                                 │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   SyncStore (event loop)                         │  │
//! │  │                                                                  │  │
//! │  │  Owns the AppState mirror. Consumes decoded snapshots and        │  │
//! │  │  presentation commands through one serialized queue, recomputes  │  │
//! │  │  the DailySummary after every relevant change, publishes state   │  │
//! │  │  through a watch channel.                                        │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ RemoteHandle   │  │ snapshot       │  │ MemoryRemote           │    │
//! │  │                │  │                │  │                        │    │
//! │  │ Channel        │  │ key → id       │  │ In-memory reference    │    │
//! │  │ boundary to    │  │ injection,     │  │ driver with push       │    │
//! │  │ the driver     │  │ skip-malformed │  │ notifications          │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  EVENTUAL CONSISTENCY:                                                 │
//! │  • mutations never touch the mirror - the listener round-trip does     │
//! │  • whole-collection replace, last notification wins                    │
//! │  • write failures are logged and dropped, never raised or retried      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `SyncStore` event loop and the `StoreHandle` contract
//! - [`state`] - the mirrored `AppState`
//! - [`remote`] - the remote document-store boundary (requests, snapshots,
//!   collection paths)
//! - [`snapshot`] - snapshot decoding into typed collections
//! - [`memory`] - in-memory reference driver
//! - [`config`] - store configuration (TOML + env)
//! - [`error`] - store and remote error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use puesto_store::{MemoryRemote, StoreConfig, SyncStore};
//!
//! # async fn demo() {
//! let remote = MemoryRemote::spawn();
//! let store = SyncStore::spawn(remote, &StoreConfig::load_or_default(None)).await;
//!
//! store.set_starting_cash(50000.0).await;
//!
//! // Reads observe the mirror as notifications arrive
//! let summary = store.summary();
//! println!("ventas del día: {}", summary.total_sales);
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod memory;
pub mod remote;
pub mod snapshot;
pub mod state;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{DatabaseSettings, StoreConfig, StoreSettings};
pub use error::{RemoteError, StoreError, StoreResult};
pub use memory::MemoryRemote;
pub use remote::{paths, RemoteHandle, RemoteRequest, Snapshot};
pub use state::AppState;
pub use store::{StoreHandle, SyncStore};
