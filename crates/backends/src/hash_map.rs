//! Hash map backend
//!
//! Entries are bucketed by the kernel hash of their key and compared with
//! `PartialEq` inside a bucket, so any value kind can be a key. Keys whose
//! backend has no hash hook all land in bucket `0`; they still work, just
//! slower.

use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::fmt;

use udfval_core::{Cursor, Limits, Map, MapBackend, Pair, Result, Value};

/// Bucketed key/value map
#[derive(Clone, Default)]
pub struct HashedMap {
    buckets: FxHashMap<u32, Vec<(Value, Value)>>,
    len: usize,
    limits: Limits,
}

impl HashedMap {
    /// Empty map with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the limits used for growth checks
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    fn entries(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.buckets.values().flatten()
    }
}

impl MapBackend for HashedMap {
    fn name(&self) -> &'static str {
        "hashmap"
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, key: &Value) -> Option<Cow<'_, Value>> {
        self.buckets
            .get(&key.hash_value())?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| Cow::Borrowed(v))
    }

    fn set(&mut self, key: Value, value: Value) -> Result<()> {
        let bucket_id = key.hash_value();
        if let Some(slot) = self
            .buckets
            .get_mut(&bucket_id)
            .and_then(|b| b.iter_mut().find(|(k, _)| *k == key))
        {
            slot.1 = value;
            return Ok(());
        }
        self.limits.check_map_entries(self.len + 1)?;
        self.buckets.entry(bucket_id).or_default().push((key, value));
        self.len += 1;
        Ok(())
    }

    fn remove(&mut self, key: &Value) -> Result<Option<Value>> {
        let bucket_id = key.hash_value();
        let Some(bucket) = self.buckets.get_mut(&bucket_id) else {
            return Ok(None);
        };
        let Some(pos) = bucket.iter().position(|(k, _)| k == key) else {
            return Ok(None);
        };
        let (_, value) = bucket.swap_remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&bucket_id);
        }
        self.len -= 1;
        Ok(Some(value))
    }

    fn iterator(&self) -> Cursor {
        Cursor::from_values(
            self.entries()
                .map(|(k, v)| Value::from(Pair::new(k.clone(), v.clone())))
                .collect(),
        )
    }

    fn boxed_clone(&self) -> Box<dyn MapBackend> {
        Box::new(self.clone())
    }
}

impl fmt::Debug for HashedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl From<HashedMap> for Map {
    fn from(map: HashedMap) -> Self {
        Map::new(map)
    }
}
