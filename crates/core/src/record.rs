//! Polymorphic record
//!
//! A `Record` represents one database record as a set of named bins,
//! whatever storage backs it. There is no positional access and no ordering
//! among bins. Bin names match exactly (case-sensitive).
//!
//! ## Aliasing
//!
//! `get` returns a `Cow`: backends that can lend a reference return
//! `Cow::Borrowed`, backends that read through a lock or fault values in from
//! storage return `Cow::Owned`. Callers must not assume either.
//!
//! ## Optional Hooks
//!
//! `remove`, `bin_names`, `meta`, `hash` and `stringify` are optional. Absent
//! hooks produce `Unsupported`, `None`, `None`, `0` and `None` respectively.
//!
//! The default `hash` is derived from the bins whenever `bin_names` is
//! installed, so records that compare equal hash equal regardless of
//! backend. Records that cannot enumerate their bins hash to `0`.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};
use crate::hash::{combine_ordered, combine_unordered, hash_bytes};
use crate::kind::ValueKind;
use crate::value::Value;

/// Storage metadata a backend may expose
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// Write generation, bumped on every successful mutation
    pub generation: u32,
    /// Time-to-live in seconds (0 = never expires)
    pub ttl: u32,
}

/// Operations a record backend installs
pub trait RecordBackend: Send + Sync + 'static {
    /// Backend name used in errors and debug output
    fn name(&self) -> &'static str;

    /// Value of bin `name`
    fn get(&self, name: &str) -> Option<Cow<'_, Value>>;

    /// Create or replace bin `name`
    fn set(&mut self, name: &str, value: Value) -> Result<()>;

    /// Delete bin `name`, returning its value
    fn remove(&mut self, name: &str) -> Result<Option<Value>> {
        let _ = name;
        Err(Error::unsupported(ValueKind::Record, self.name(), "remove"))
    }

    /// Names of every bin, if the backend can enumerate them
    fn bin_names(&self) -> Option<Vec<String>> {
        None
    }

    /// Storage metadata
    fn meta(&self) -> Option<RecordMeta> {
        None
    }

    /// Kernel hash hook
    ///
    /// Must agree with `Record` equality. The default combines the
    /// `(name, value)` pairs order-independently.
    fn hash(&self) -> u32 {
        let Some(names) = self.bin_names() else {
            return 0;
        };
        combine_unordered(names.iter().map(|name| {
            let value = self.get(name).map_or(0, |v| v.hash_value());
            combine_ordered([hash_bytes(name.as_bytes()), value])
        }))
    }

    /// Kernel stringify hook
    fn stringify(&self) -> Option<String> {
        None
    }

    /// Clone this backend behind a new box
    fn boxed_clone(&self) -> Box<dyn RecordBackend>;
}

/// Named-bin record handle
pub struct Record {
    backend: Box<dyn RecordBackend>,
}

impl Record {
    /// Wrap a backend
    pub fn new(backend: impl RecordBackend) -> Self {
        Record {
            backend: Box::new(backend),
        }
    }

    /// Name of the installed backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Value of bin `name`; `None` if the bin does not exist
    pub fn get(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.backend.get(name)
    }

    /// Store `value` in bin `name`, creating the bin if needed
    ///
    /// The previous value, if any, is dropped. Empty names are rejected;
    /// backends may impose further naming rules.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidBinName {
                name: String::new(),
                reason: "bin name is empty".to_string(),
            });
        }
        self.backend.set(name, value.into())
    }

    /// Delete bin `name`
    pub fn remove(&mut self, name: &str) -> Result<Option<Value>> {
        self.backend.remove(name)
    }

    /// Names of every bin, if the backend can enumerate them
    pub fn bin_names(&self) -> Option<Vec<String>> {
        self.backend.bin_names()
    }

    /// Number of bins, if the backend can enumerate them
    pub fn num_bins(&self) -> Option<usize> {
        self.bin_names().map(|names| names.len())
    }

    /// Storage metadata
    pub fn meta(&self) -> Option<RecordMeta> {
        self.backend.meta()
    }

    /// Write generation; `0` if the backend tracks none
    pub fn generation(&self) -> u32 {
        self.meta().map_or(0, |m| m.generation)
    }

    /// Time-to-live; `0` if the backend tracks none
    pub fn ttl(&self) -> u32 {
        self.meta().map_or(0, |m| m.ttl)
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

impl Clone for Record {
    fn clone(&self) -> Self {
        Record {
            backend: self.backend.boxed_clone(),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("backend", &self.backend_name())
            .field("bins", &self.num_bins())
            .finish()
    }
}

/// Records compare equal only when both can enumerate their bins and every
/// bin holds an equal value.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        let (Some(mut mine), Some(mut theirs)) = (self.bin_names(), other.bin_names()) else {
            return false;
        };
        mine.sort_unstable();
        theirs.sort_unstable();
        mine == theirs
            && mine
                .iter()
                .all(|name| self.get(name).as_deref() == other.get(name).as_deref())
    }
}
