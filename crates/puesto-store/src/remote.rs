//! # Remote Document Store Boundary
//!
//! The wire contract with the remote hierarchical document store, expressed
//! as message-passing between the store and a driver task.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Remote Boundary                                     │
//! │                                                                         │
//! │  SyncStore ──► RemoteHandle ── mpsc ──► driver task (MemoryRemote,     │
//! │                                         or a real transport)            │
//! │                                                                         │
//! │  Subscribe { path, tx } ──► driver emits the CURRENT snapshot at once, │
//! │                             then a fresh snapshot on every change       │
//! │                             under the path, forever                     │
//! │  Create { path, fields } ─► driver assigns a unique key                 │
//! │  Overwrite { path, value }  full or partial replacement at that path    │
//! │  Delete { path }                                                        │
//! │                                                                         │
//! │  All four are asynchronous, unordered relative to each other, and      │
//! │  fire-and-forget: failures surface only as log records.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::RemoteError;

/// Buffer size for per-subscription snapshot channels.
const SNAPSHOT_BUFFER: usize = 16;

// =============================================================================
// Collection Paths
// =============================================================================

/// The five addressable resources of the remote store.
///
/// These are wire names: existing data in the document store lives under
/// them, so they are not translated.
pub mod paths {
    /// Product collection.
    pub const PRODUCTS: &str = "productos";
    /// Ingredient collection.
    pub const INGREDIENTS: &str = "ingredientes";
    /// Sale collection.
    pub const SALES: &str = "ventas";
    /// Expense collection.
    pub const EXPENSES: &str = "gastos";
    /// Starting-cash scalar.
    pub const STARTING_CASH: &str = "dineroInicial";
}

// =============================================================================
// Snapshot
// =============================================================================

/// The content pushed for a subscribed path.
///
/// A collection snapshot is a JSON object mapping generated-key →
/// record-fields-without-id; a scalar snapshot is the bare value.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// Nothing stored at the path. Treated as an empty collection / zero.
    Absent,
    /// The full current content at the path.
    Value(Value),
}

// =============================================================================
// Remote Requests
// =============================================================================

/// A request to the remote-store driver.
#[derive(Debug)]
pub enum RemoteRequest {
    /// Registers a persistent listener for `path`.
    ///
    /// The driver must send the current snapshot immediately and a new one
    /// after every change under the path. There is no unsubscribe: the
    /// registration lives until either side drops its channel end.
    Subscribe {
        path: String,
        snapshots: mpsc::Sender<Snapshot>,
    },

    /// Creates a record under a collection path; the driver assigns the key.
    Create { path: String, fields: Value },

    /// Full or partial replacement of the value at `path`.
    Overwrite { path: String, value: Value },

    /// Removes the value at `path`.
    Delete { path: String },
}

// =============================================================================
// Remote Handle
// =============================================================================

/// Handle for talking to the remote-store driver from other components.
///
/// Cheap to clone. Every write method is fire-and-forget: a dead driver is
/// logged at `warn` and the request is dropped. Callers are never notified
/// of remote-write failures.
#[derive(Clone)]
pub struct RemoteHandle {
    requests_tx: mpsc::Sender<RemoteRequest>,
}

impl RemoteHandle {
    /// Wraps the request sender of a running driver task.
    pub fn new(requests_tx: mpsc::Sender<RemoteRequest>) -> Self {
        RemoteHandle { requests_tx }
    }

    /// Registers a persistent listener and returns its snapshot stream.
    pub async fn subscribe(&self, path: &str) -> mpsc::Receiver<Snapshot> {
        let (snapshots, rx) = mpsc::channel(SNAPSHOT_BUFFER);
        self.send(RemoteRequest::Subscribe {
            path: path.to_string(),
            snapshots,
        })
        .await;
        rx
    }

    /// Creates a record with a driver-generated key.
    pub async fn create(&self, path: &str, fields: Value) {
        self.send(RemoteRequest::Create {
            path: path.to_string(),
            fields,
        })
        .await;
    }

    /// Overwrites the value at `path` (full record or single field).
    pub async fn overwrite(&self, path: &str, value: Value) {
        self.send(RemoteRequest::Overwrite {
            path: path.to_string(),
            value,
        })
        .await;
    }

    /// Deletes the value at `path`.
    pub async fn delete(&self, path: &str) {
        self.send(RemoteRequest::Delete {
            path: path.to_string(),
        })
        .await;
    }

    async fn send(&self, request: RemoteRequest) {
        if self.requests_tx.send(request).await.is_err() {
            warn!(error = %RemoteError::Closed, "Dropping remote request");
        }
    }
}
