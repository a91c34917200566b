//! Durable-slot persistence for the window store.
//!
//! The whole store (windows, counters, usage stats, initialization flag, and snapshot history) is
//! written as one versioned JSON document under [`WINDOW_STORE_SLOT_KEY`].

use platform_host::{write_slot_with, DurableStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{DesktopState, Snapshot, DESKTOP_LAYOUT_SCHEMA_VERSION};

/// Durable slot holding the serialized window store.
pub const WINDOW_STORE_SLOT_KEY: &str = "desktop.window_store.v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Versioned document written to [`WINDOW_STORE_SLOT_KEY`].
pub struct PersistedDesktop {
    /// Layout schema the document was written with.
    pub schema_version: u32,
    /// Window store state.
    pub state: DesktopState,
    /// Time-machine history, oldest first.
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

impl PersistedDesktop {
    /// Wraps `state` and `snapshots` with the current schema version.
    pub fn new(state: DesktopState, snapshots: Vec<Snapshot>) -> Self {
        Self {
            schema_version: DESKTOP_LAYOUT_SCHEMA_VERSION,
            state,
            snapshots,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures while moving the window store in and out of durable storage.
pub enum PersistenceError {
    /// The host store rejected the read or write.
    #[error("durable store failed: {0}")]
    Store(String),
    /// The slot contents could not be encoded or decoded.
    #[error("window store document is invalid: {0}")]
    Serialize(String),
    /// The slot was written by an incompatible layout version.
    #[error("window store schema {found} is not supported (expected {expected})")]
    SchemaMismatch {
        /// Version this build understands.
        expected: u32,
        /// Version found in the slot.
        found: u32,
    },
}

/// Loads the persisted window store, if the slot holds one.
///
/// # Errors
///
/// Returns [`PersistenceError`] when the store read fails, the JSON is malformed, or the document
/// carries an unsupported schema version.
pub async fn load_persisted_desktop(
    store: &dyn DurableStore,
) -> Result<Option<PersistedDesktop>, PersistenceError> {
    let Some(raw) = store
        .read_slot(WINDOW_STORE_SLOT_KEY)
        .await
        .map_err(PersistenceError::Store)?
    else {
        return Ok(None);
    };

    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| PersistenceError::Serialize(e.to_string()))?;
    let found = value
        .get("schema_version")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0) as u32;
    if found != DESKTOP_LAYOUT_SCHEMA_VERSION {
        return Err(PersistenceError::SchemaMismatch {
            expected: DESKTOP_LAYOUT_SCHEMA_VERSION,
            found,
        });
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| PersistenceError::Serialize(e.to_string()))
}

/// Writes `document` to the window store slot.
///
/// # Errors
///
/// Returns [`PersistenceError::Store`] when encoding or the store write fails.
pub async fn save_persisted_desktop(
    store: &dyn DurableStore,
    document: &PersistedDesktop,
) -> Result<(), PersistenceError> {
    write_slot_with(store, WINDOW_STORE_SLOT_KEY, document)
        .await
        .map_err(PersistenceError::Store)
}
