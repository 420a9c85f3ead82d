//! Polymorphic map
//!
//! Same dispatch pattern as [`crate::List`]: a `Map` handle owns a boxed
//! [`MapBackend`]. Keys are arbitrary values compared with `PartialEq`;
//! iteration yields `Pair(key, value)` values in backend-defined order.

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};
use crate::hash::combine_unordered;
use crate::iterator::Cursor;
use crate::kind::ValueKind;
use crate::value::{render, Value};

/// Operations a map backend installs
pub trait MapBackend: Send + Sync + 'static {
    /// Backend name used in errors and debug output
    fn name(&self) -> &'static str;

    /// Number of entries
    fn len(&self) -> usize;

    /// Value stored under `key`
    fn get(&self, key: &Value) -> Option<Cow<'_, Value>>;

    /// Insert or replace the value under `key`
    fn set(&mut self, key: Value, value: Value) -> Result<()> {
        let _ = (key, value);
        Err(Error::unsupported(ValueKind::Map, self.name(), "set"))
    }

    /// Remove the entry under `key`, returning its value
    fn remove(&mut self, key: &Value) -> Result<Option<Value>> {
        let _ = key;
        Err(Error::unsupported(ValueKind::Map, self.name(), "remove"))
    }

    /// Cursor yielding `Pair(key, value)` for every entry
    fn iterator(&self) -> Cursor;

    /// Order-independent hash over the entries
    fn hash(&self) -> u32 {
        combine_unordered(Iterator::map(self.iterator(), |pair| pair.hash_value()))
    }

    /// `{k: v, ...}` rendering
    fn stringify(&self) -> Option<String> {
        let parts: Vec<String> = self
            .iterator()
            .filter_map(|v| {
                v.as_pair()
                    .map(|p| format!("{}: {}", render(p.first()), render(p.second())))
            })
            .collect();
        Some(format!("{{{}}}", parts.join(", ")))
    }

    /// Clone this backend behind a new box
    fn boxed_clone(&self) -> Box<dyn MapBackend>;
}

/// Key/value association handle
pub struct Map {
    backend: Box<dyn MapBackend>,
}

impl Map {
    /// Wrap a backend
    pub fn new(backend: impl MapBackend) -> Self {
        Map {
            backend: Box::new(backend),
        }
    }

    /// Name of the installed backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Number of entries
    pub fn size(&self) -> usize {
        self.backend.len()
    }

    /// Check if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Value stored under `key`; `None` if absent
    pub fn get(&self, key: &Value) -> Option<Cow<'_, Value>> {
        self.backend.get(key)
    }

    /// Insert or replace, dropping any previous value
    pub fn set(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
        self.backend.set(key.into(), value.into())
    }

    /// Remove an entry
    pub fn remove(&mut self, key: &Value) -> Result<Option<Value>> {
        self.backend.remove(key)
    }

    /// Cursor over `Pair(key, value)` entries
    pub fn iterator(&self) -> Cursor {
        self.backend.iterator()
    }

    /// Kernel hash
    pub fn hash_value(&self) -> u32 {
        self.backend.hash()
    }

    /// Kernel string rendering
    pub fn stringify(&self) -> Option<String> {
        self.backend.stringify()
    }
}

impl Clone for Map {
    fn clone(&self) -> Self {
        Map {
            backend: self.backend.boxed_clone(),
        }
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("backend", &self.backend_name())
            .field("size", &self.size())
            .finish()
    }
}

/// Maps are equal when they hold the same keys mapped to equal values.
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && self.iterator().all(|entry| match entry.as_pair() {
                Some(p) => other.get(p.first()).as_deref() == Some(p.second()),
                None => false,
            })
    }
}
