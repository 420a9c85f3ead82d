//! In-memory record store
//!
//! `RecordStore` holds records keyed by user key, the way a storage engine
//! would. UDFs never see the store's maps directly: they get [`Record`]
//! handles whose backend ([`StoredRecord`]) reads and writes through the
//! store under its lock.
//!
//! # Design Notes
//!
//! - `BTreeMap<String, StoredBins>` so scans come back in key order
//! - One `parking_lot::RwLock` guards every record; reads share it
//! - Reads copy the bin value out of the lock (`Cow::Owned`)
//! - Every successful write bumps the record's generation
//! - No persistence and no expiry: `ttl` is metadata only

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use udfval_core::{
    Cursor, Error, Limits, Record, RecordBackend, RecordMeta, Result, Stream, Value,
};

#[derive(Debug, Default)]
struct StoredBins {
    bins: FxHashMap<String, Value>,
    meta: RecordMeta,
}

#[derive(Debug, Default)]
struct StoreInner {
    records: RwLock<BTreeMap<String, StoredBins>>,
    limits: Limits,
}

/// Thread-safe in-memory record store
///
/// Cloning the store is cheap and yields another handle on the same records.
#[derive(Clone, Default)]
pub struct RecordStore {
    inner: Arc<StoreInner>,
}

impl RecordStore {
    /// Create an empty store with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store enforcing `limits`
    pub fn with_limits(limits: Limits) -> Self {
        RecordStore {
            inner: Arc::new(StoreInner {
                records: RwLock::new(BTreeMap::new()),
                limits,
            }),
        }
    }

    /// Handle on the record under `key`, creating an empty record if needed
    pub fn open(&self, key: &str) -> Record {
        let mut records = self.inner.records.write();
        if !records.contains_key(key) {
            records.insert(key.to_string(), StoredBins::default());
            tracing::debug!(target: "udfval::store", key, "Created record");
        }
        drop(records);
        self.handle(key.to_string())
    }

    /// Handle on an existing record
    pub fn get_record(&self, key: &str) -> Option<Record> {
        if self.inner.records.read().contains_key(key) {
            Some(self.handle(key.to_string()))
        } else {
            None
        }
    }

    /// Check whether a record exists
    pub fn contains(&self, key: &str) -> bool {
        self.inner.records.read().contains_key(key)
    }

    /// Delete a record and all its bins
    ///
    /// Handles already given out stay valid but read as empty and refuse
    /// writes.
    pub fn remove(&self, key: &str) -> bool {
        let removed = self.inner.records.write().remove(key).is_some();
        if removed {
            tracing::debug!(target: "udfval::store", key, "Removed record");
        }
        removed
    }

    /// Set a record's time-to-live in seconds
    ///
    /// Counts as a write: the generation is bumped.
    pub fn set_ttl(&self, key: &str, ttl: u32) -> bool {
        match self.inner.records.write().get_mut(key) {
            Some(stored) => {
                stored.meta.ttl = ttl;
                stored.meta.generation = stored.meta.generation.wrapping_add(1);
                true
            }
            None => false,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.inner.records.read().len()
    }

    /// Check if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Restartable stream over every record, in key order
    pub fn scan(&self) -> RecordScan {
        RecordScan {
            store: self.clone(),
        }
    }

    fn handle(&self, key: String) -> Record {
        Record::new(StoredRecord {
            store: Arc::clone(&self.inner),
            key,
        })
    }
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.len())
            .finish()
    }
}

/// Record backend reading and writing through a [`RecordStore`]
///
/// Cloning the backend yields another handle on the same stored record.
#[derive(Clone)]
pub struct StoredRecord {
    store: Arc<StoreInner>,
    key: String,
}

impl StoredRecord {
    /// User key of the record
    pub fn key(&self) -> &str {
        &self.key
    }

    fn gone(&self) -> Error {
        Error::Backend(format!("record '{}' no longer exists", self.key))
    }
}

impl RecordBackend for StoredRecord {
    fn name(&self) -> &'static str {
        "stored"
    }

    fn get(&self, name: &str) -> Option<Cow<'_, Value>> {
        let records = self.store.records.read();
        records
            .get(&self.key)?
            .bins
            .get(name)
            .map(|v| Cow::Owned(v.clone()))
    }

    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let limits = &self.store.limits;
        limits.validate_bin_name(name)?;
        let mut records = self.store.records.write();
        let stored = records.get_mut(&self.key).ok_or_else(|| self.gone())?;
        if !stored.bins.contains_key(name) {
            limits.check_bins(stored.bins.len() + 1)?;
        }
        stored.bins.insert(name.to_string(), value);
        stored.meta.generation = stored.meta.generation.wrapping_add(1);
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<Option<Value>> {
        let mut records = self.store.records.write();
        let stored = records.get_mut(&self.key).ok_or_else(|| self.gone())?;
        let removed = stored.bins.remove(name);
        if removed.is_some() {
            stored.meta.generation = stored.meta.generation.wrapping_add(1);
        }
        Ok(removed)
    }

    fn bin_names(&self) -> Option<Vec<String>> {
        let records = self.store.records.read();
        let mut names: Vec<String> = records
            .get(&self.key)
            .map(|stored| stored.bins.keys().cloned().collect())
            .unwrap_or_default();
        names.sort_unstable();
        Some(names)
    }

    fn meta(&self) -> Option<RecordMeta> {
        self.store.records.read().get(&self.key).map(|s| s.meta)
    }

    fn boxed_clone(&self) -> Box<dyn RecordBackend> {
        Box::new(self.clone())
    }
}

impl fmt::Debug for StoredRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredRecord")
            .field("key", &self.key)
            .finish()
    }
}

/// Stream of every record in a store
///
/// Each call to `iterator` snapshots the key set; records created afterwards
/// are not visited, records removed afterwards are yielded as empty handles.
#[derive(Debug, Clone)]
pub struct RecordScan {
    store: RecordStore,
}

impl Stream for RecordScan {
    fn iterator(&self) -> Cursor {
        let keys: Vec<String> = self.store.inner.records.read().keys().cloned().collect();
        let store = self.store.clone();
        let mut keys = keys.into_iter();
        Cursor::from_fn(move || keys.next().map(|key| Value::from(store.handle(key))))
    }

    fn is_restartable(&self) -> bool {
        true
    }
}
