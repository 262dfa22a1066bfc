//! # In-Memory Document Store Driver
//!
//! A driver task implementing the full remote-store contract over an
//! in-process JSON tree: hierarchical paths, generated keys, and push
//! notifications that replay the whole subscribed subtree on every change.
//!
//! Serves as the reference driver and as the backend for the integration
//! tests; a real network transport implements the same [`RemoteRequest`]
//! loop against the hosted document store.

use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::RemoteError;
use crate::remote::{RemoteHandle, RemoteRequest, Snapshot};

/// Buffer size for the driver's request channel.
const REQUEST_BUFFER: usize = 64;

struct Subscriber {
    path: String,
    snapshots: mpsc::Sender<Snapshot>,
}

/// In-memory remote document store.
pub struct MemoryRemote {
    requests_rx: mpsc::Receiver<RemoteRequest>,
    tree: Map<String, Value>,
    subscribers: Vec<Subscriber>,
    denied: Vec<String>,
}

impl MemoryRemote {
    /// Spawns the driver task and returns a handle to it.
    pub fn spawn() -> RemoteHandle {
        Self::spawn_inner(Vec::new())
    }

    /// Spawns a driver that rejects every write whose path contains one of
    /// the given fragments.
    ///
    /// Test hook for the silent-degradation contract: rejected writes are
    /// logged and dropped, and no notification is pushed.
    pub fn spawn_denying(fragments: &[&str]) -> RemoteHandle {
        Self::spawn_inner(fragments.iter().map(|f| f.to_string()).collect())
    }

    fn spawn_inner(denied: Vec<String>) -> RemoteHandle {
        let (requests_tx, requests_rx) = mpsc::channel(REQUEST_BUFFER);

        let driver = MemoryRemote {
            requests_rx,
            tree: Map::new(),
            subscribers: Vec::new(),
            denied,
        };
        tokio::spawn(driver.run());

        RemoteHandle::new(requests_tx)
    }

    async fn run(mut self) {
        debug!("Memory remote driver starting");

        while let Some(request) = self.requests_rx.recv().await {
            match request {
                RemoteRequest::Subscribe { path, snapshots } => {
                    // The current snapshot is pushed before the listener is
                    // registered, matching read-all-with-live-updates.
                    let snapshot = self.snapshot_at(&path);
                    if snapshots.send(snapshot).await.is_ok() {
                        self.subscribers.push(Subscriber { path, snapshots });
                    }
                }

                RemoteRequest::Create { path, fields } => {
                    if self.reject(&path) {
                        continue;
                    }
                    let key = Uuid::new_v4().to_string();
                    write_at(&mut self.tree, &format!("{path}/{key}"), fields);
                    self.notify(&path).await;
                }

                RemoteRequest::Overwrite { path, value } => {
                    if self.reject(&path) {
                        continue;
                    }
                    write_at(&mut self.tree, &path, value);
                    self.notify(&path).await;
                }

                RemoteRequest::Delete { path } => {
                    if self.reject(&path) {
                        continue;
                    }
                    remove_at(&mut self.tree, &path);
                    self.notify(&path).await;
                }
            }
        }

        debug!("Memory remote driver stopped");
    }

    fn reject(&self, path: &str) -> bool {
        let denied = self.denied.iter().any(|f| path.contains(f.as_str()));
        if denied {
            warn!(
                error = %RemoteError::Rejected { path: path.to_string() },
                "Remote write failed"
            );
        }
        denied
    }

    fn snapshot_at(&self, path: &str) -> Snapshot {
        match node_at(&self.tree, path) {
            Some(value) => Snapshot::Value(value.clone()),
            None => Snapshot::Absent,
        }
    }

    /// Re-pushes the subscribed subtree to every listener affected by a
    /// change at `changed_path`. Listeners with a dropped receiver are
    /// forgotten here.
    async fn notify(&mut self, changed_path: &str) {
        let subscribers = std::mem::take(&mut self.subscribers);
        let mut kept = Vec::with_capacity(subscribers.len());

        for subscriber in subscribers {
            if !affects(changed_path, &subscriber.path) {
                kept.push(subscriber);
                continue;
            }

            let snapshot = self.snapshot_at(&subscriber.path);
            if subscriber.snapshots.send(snapshot).await.is_ok() {
                kept.push(subscriber);
            }
        }

        self.subscribers = kept;
    }
}

// =============================================================================
// Tree Operations
// =============================================================================

/// True when a change at `changed` is visible from a subscription at `sub`:
/// the change happened inside the subscribed subtree, or rewrote one of its
/// ancestors.
fn affects(changed: &str, sub: &str) -> bool {
    changed == sub
        || changed.starts_with(&format!("{sub}/"))
        || sub.starts_with(&format!("{changed}/"))
}

fn node_at<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('/');
    let mut node = root.get(segments.next()?)?;
    for segment in segments {
        node = node.as_object()?.get(segment)?;
    }
    Some(node)
}

fn write_at(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('/').collect();
    let Some(last) = segments.pop() else { return };

    let mut node = root;
    for segment in segments {
        let entry = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Some(next) = entry.as_object_mut() else {
            return;
        };
        node = next;
    }

    node.insert(last.to_string(), value);
}

fn remove_at(root: &mut Map<String, Value>, path: &str) {
    let mut segments: Vec<&str> = path.split('/').collect();
    let Some(last) = segments.pop() else { return };

    let mut node = root;
    for segment in segments {
        match node.get_mut(segment).and_then(Value::as_object_mut) {
            Some(next) => node = next,
            None => return, // nothing to remove
        }
    }

    node.remove(last);
}

// =============================================================================
// Unit Tests
// =============================================================================
