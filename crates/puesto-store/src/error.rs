//! # Store Error Types
//!
//! Error types for the synchronization store.
//!
//! ## Error Surfaces
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Where Errors Go                                     │
//! │                                                                         │
//! │  ┌─────────────────┐         ┌──────────────────────────────────────┐  │
//! │  │  Configuration  │         │  Remote writes                       │  │
//! │  │                 │         │                                      │  │
//! │  │  InvalidConfig  │ raised  │  Closed / Rejected / Decode          │  │
//! │  │  ConfigLoad/    │ ──────► │  LOGGED ONLY - the mutation API      │  │
//! │  │  SaveFailed     │ caller  │  returns (), callers are never       │  │
//! │  └─────────────────┘         │  notified and nothing is retried     │  │
//! │                              └──────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The remote store is eventually consistent and fire-and-forget by
//! contract: a failed write simply never produces a listener round-trip.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Store Error
// =============================================================================

/// Store-level failures that DO surface to the caller (configuration and
/// channel plumbing). Remote-write failures never appear here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid store configuration.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Channel send/receive failed.
    #[error("Channel error: {0}")]
    ChannelError(String),
}

// =============================================================================
// Remote Error
// =============================================================================

/// Failures at the remote-store boundary.
///
/// Per the wire contract these are a logging side channel only: they are
/// formatted into `tracing` records by the handle and the driver, and are
/// never propagated to mutation callers.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The driver task is gone; the request was dropped.
    #[error("Remote driver is gone")]
    Closed,

    /// The driver refused the write.
    #[error("Write rejected at {path}")]
    Rejected { path: String },

    /// A snapshot entry could not be decoded into its record type.
    #[error("Snapshot decode failed: {0}")]
    Decode(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RemoteError::Rejected {
            path: "ingredientes/abc/stock".into(),
        };
        assert_eq!(err.to_string(), "Write rejected at ingredientes/abc/stock");

        let err = StoreError::InvalidConfig("event_buffer must be greater than 0".into());
        assert!(err.to_string().contains("event_buffer"));
    }
}
