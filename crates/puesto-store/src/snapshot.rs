//! # Snapshot Decoding
//!
//! Turns the remote store's untyped snapshots into typed collections.
//!
//! A collection snapshot arrives as `{ "<generated-key>": { ...fields } }`;
//! the key becomes the record's `id` after deserialization. Entries that do
//! not decode into their record type are logged and skipped - a single
//! malformed record must never poison a whole collection replace.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use puesto_core::Keyed;

use crate::error::RemoteError;
use crate::remote::Snapshot;

/// Decodes a collection snapshot, mapping each generated key onto the
/// record's `id` field.
///
/// Absent snapshots and non-object values yield an empty collection.
pub fn decode_collection<T>(path: &str, snapshot: Snapshot) -> Vec<T>
where
    T: Keyed + DeserializeOwned,
{
    let entries = match snapshot {
        Snapshot::Absent => return Vec::new(),
        Snapshot::Value(Value::Object(entries)) => entries,
        Snapshot::Value(other) => {
            warn!(
                %path,
                error = %RemoteError::Decode(format!("expected an object, got {other}")),
                "Ignoring malformed collection snapshot"
            );
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (key, fields) in entries {
        match serde_json::from_value::<T>(fields) {
            Ok(mut record) => {
                record.set_id(key);
                records.push(record);
            }
            Err(error) => {
                warn!(
                    %path,
                    %key,
                    error = %RemoteError::Decode(error.to_string()),
                    "Skipping malformed record in snapshot"
                );
            }
        }
    }

    records
}

/// Decodes a scalar snapshot as a number; absent or malformed values
/// decode to zero.
pub fn decode_scalar_f64(path: &str, snapshot: Snapshot) -> f64 {
    match snapshot {
        Snapshot::Absent => 0.0,
        Snapshot::Value(value) => match value.as_f64() {
            Some(n) => n,
            None => {
                warn!(
                    %path,
                    error = %RemoteError::Decode(format!("expected a number, got {value}")),
                    "Ignoring malformed scalar snapshot"
                );
                0.0
            }
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use puesto_core::Ingredient;
    use serde_json::json;

    #[test]
    fn absent_decodes_to_empty_collection() {
        let records: Vec<Ingredient> = decode_collection("ingredientes", Snapshot::Absent);
        assert!(records.is_empty());
    }

    #[test]
    fn keys_become_record_ids() {
        let snapshot = Snapshot::Value(json!({
            "key-a": {
                "nombre": "Harina",
                "unidadMedida": "kg",
                "costoUnitario": 4000.0,
                "stock": 10.0,
                "stockMinimo": 2.0,
            },
            "key-b": {
                "nombre": "Queso",
                "unidadMedida": "kg",
                "costoUnitario": 18000.0,
                "stock": 3.0,
                "stockMinimo": 1.0,
            },
        }));

        let mut records: Vec<Ingredient> = decode_collection("ingredientes", snapshot);
        records.sort_by(|a, b| a.id.cmp(&b.id));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "key-a");
        assert_eq!(records[0].name, "Harina");
        assert_eq!(records[1].id, "key-b");
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let snapshot = Snapshot::Value(json!({
            "bad": { "nombre": 42 },
            "good": {
                "nombre": "Harina",
                "unidadMedida": "kg",
                "costoUnitario": 4000.0,
                "stock": 10.0,
                "stockMinimo": 2.0,
            },
        }));

        let records: Vec<Ingredient> = decode_collection("ingredientes", snapshot);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "good");
    }

    #[test]
    fn non_object_snapshot_decodes_to_empty() {
        let records: Vec<Ingredient> =
            decode_collection("ingredientes", Snapshot::Value(json!("garbage")));
        assert!(records.is_empty());
    }

    #[test]
    fn scalar_decoding() {
        assert_eq!(decode_scalar_f64("dineroInicial", Snapshot::Absent), 0.0);
        assert_eq!(
            decode_scalar_f64("dineroInicial", Snapshot::Value(json!(50000.0))),
            50000.0
        );
        assert_eq!(
            decode_scalar_f64("dineroInicial", Snapshot::Value(json!("nope"))),
            0.0
        );
    }
}
