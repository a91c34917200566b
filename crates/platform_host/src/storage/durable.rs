//! Durable key/value slot contracts and adapters.
//!
//! The desktop runtime serializes its whole window store into a single named slot on every
//! mutation and reads it back once at boot. Hosts only need to move opaque JSON text in and out of
//! a slot; schema handling stays with the caller.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::Serialize;

/// Object-safe boxed future used by [`DurableStore`] async methods.
pub type DurableStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for durable slots (JSON stored as text per key).
pub trait DurableStore {
    /// Reads the raw JSON text stored in `key`, if any.
    fn read_slot<'a>(&'a self, key: &'a str)
        -> DurableStoreFuture<'a, Result<Option<String>, String>>;

    /// Replaces the raw JSON text stored in `key`.
    fn write_slot<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> DurableStoreFuture<'a, Result<(), String>>;

    /// Removes `key` from the store. Removing a missing key succeeds.
    fn clear_slot<'a>(&'a self, key: &'a str) -> DurableStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that never retains anything. Used on hosts without durable storage.
pub struct NoopDurableStore;

impl DurableStore for NoopDurableStore {
    fn read_slot<'a>(
        &'a self,
        _key: &'a str,
    ) -> DurableStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn write_slot<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> DurableStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn clear_slot<'a>(&'a self, _key: &'a str) -> DurableStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Process-local slot store. Clones share the same slots.
pub struct MemoryDurableStore {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryDurableStore {
    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Returns `true` when no slot holds a value.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl DurableStore for MemoryDurableStore {
    fn read_slot<'a>(
        &'a self,
        key: &'a str,
    ) -> DurableStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.slots.borrow().get(key).cloned()) })
    }

    fn write_slot<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> DurableStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.slots
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn clear_slot<'a>(&'a self, key: &'a str) -> DurableStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.slots.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Serializes and writes a typed slot value through a [`DurableStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn write_slot_with<S: DurableStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.write_slot(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde::Serialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize)]
    struct Layout {
        active: Option<u64>,
        counter: u64,
    }

    #[test]
    fn memory_store_clones_share_slots() {
        let store = MemoryDurableStore::default();
        let other = store.clone();

        block_on(store.write_slot("layout", "{\"counter\":3}")).expect("write");
        assert_eq!(
            block_on(other.read_slot("layout")).expect("read"),
            Some("{\"counter\":3}".to_string())
        );
        assert_eq!(other.len(), 1);

        block_on(other.clear_slot("layout")).expect("clear");
        assert!(store.is_empty());
    }

    #[test]
    fn typed_write_stores_compact_json() {
        let store = MemoryDurableStore::default();
        let store_obj: &dyn DurableStore = &store;
        block_on(write_slot_with(
            store_obj,
            "layout",
            &Layout {
                active: Some(4),
                counter: 9,
            },
        ))
        .expect("write typed slot");

        assert_eq!(
            block_on(store.read_slot("layout")).expect("read"),
            Some(r#"{"active":4,"counter":9}"#.to_string())
        );
    }

    #[test]
    fn noop_store_reads_nothing_and_accepts_writes() {
        let store = NoopDurableStore;
        block_on(store.write_slot("k", "{}")).expect("write");
        assert_eq!(block_on(store.read_slot("k")).expect("read"), None);
        block_on(store.clear_slot("k")).expect("clear");
    }
}
