//! Polymorphic list
//!
//! A `List` is a handle over a boxed [`ListBackend`]. The handle owns the
//! backend outright; dropping the handle tears the backend down once.
//!
//! ## Contract
//!
//! - `get`/`set` take signed indices and fail with `IndexOutOfRange` for
//!   anything outside `0..size()`; the backend is never asked for an index it
//!   does not hold.
//! - `append`/`prepend`/`set` move the value into the list. On error the list
//!   is unchanged.
//! - `tail` always yields a well-formed list (possibly empty). Whether it is a
//!   view or a copy is the backend's documented choice.
//! - `iterator` yields elements in index order.

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};
use crate::hash::combine_ordered;
use crate::iterator::Cursor;
use crate::kind::ValueKind;
use crate::value::{render, Value};

/// Operations a list backend installs
///
/// Only `name`, `len`, `get` and `boxed_clone` are required. Mutators default
/// to `Unsupported`; queries default to behaviour derived from `len`/`get`.
/// Indices passed to the backend are always in range.
pub trait ListBackend: Send + Sync + 'static {
    /// Backend name used in errors and debug output
    fn name(&self) -> &'static str;

    /// Number of elements
    fn len(&self) -> usize;

    /// Element at `index`
    fn get(&self, index: usize) -> Option<Cow<'_, Value>>;

    /// Replace the element at `index`
    fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let _ = (index, value);
        Err(Error::unsupported(ValueKind::List, self.name(), "set"))
    }

    /// Insert at the end
    fn append(&mut self, value: Value) -> Result<()> {
        let _ = value;
        Err(Error::unsupported(ValueKind::List, self.name(), "append"))
    }

    /// Insert at the front
    fn prepend(&mut self, value: Value) -> Result<()> {
        let _ = value;
        Err(Error::unsupported(ValueKind::List, self.name(), "prepend"))
    }

    /// First element, if any
    fn head(&self) -> Option<Cow<'_, Value>> {
        self.get(0)
    }

    /// All elements but the first
    fn tail(&self) -> Result<List> {
        Err(Error::unsupported(ValueKind::List, self.name(), "tail"))
    }

    /// Cursor over the elements in index order
    ///
    /// The default snapshots every element up front; lazy backends override it.
    fn iterator(&self) -> Cursor {
        let values = (0..self.len())
            .filter_map(|i| self.get(i).map(Cow::into_owned))
            .collect();
        Cursor::from_values(values)
    }

    /// Hash combining element hashes in order
    fn hash(&self) -> u32 {
        combine_ordered((0..self.len()).filter_map(|i| self.get(i).map(|v| v.hash_value())))
    }

    /// `[a, b, c]` rendering
    fn stringify(&self) -> Option<String> {
        let parts: Vec<String> = (0..self.len())
            .filter_map(|i| self.get(i).map(|v| render(&v)))
            .collect();
        Some(format!("[{}]", parts.join(", ")))
    }

    /// Clone this backend behind a new box
    fn boxed_clone(&self) -> Box<dyn ListBackend>;
}

/// Ordered sequence handle
pub struct List {
    backend: Box<dyn ListBackend>,
}

impl List {
    /// Wrap a backend
    pub fn new(backend: impl ListBackend) -> Self {
        List {
            backend: Box::new(backend),
        }
    }

    /// Wrap an already boxed backend
    pub fn from_boxed(backend: Box<dyn ListBackend>) -> Self {
        List { backend }
    }

    /// Name of the installed backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Number of elements
    pub fn size(&self) -> usize {
        self.backend.len()
    }

    /// Check if the list has no elements
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn check_index(&self, index: i64) -> Result<usize> {
        let size = self.size();
        usize::try_from(index)
            .ok()
            .filter(|&i| i < size)
            .ok_or(Error::IndexOutOfRange { index, size })
    }

    /// Element at `index`
    pub fn get(&self, index: i64) -> Result<Cow<'_, Value>> {
        let i = self.check_index(index)?;
        self.backend.get(i).ok_or(Error::IndexOutOfRange {
            index,
            size: self.size(),
        })
    }

    /// Replace the element at `index`, dropping the previous element
    pub fn set(&mut self, index: i64, value: impl Into<Value>) -> Result<()> {
        let i = self.check_index(index)?;
        self.backend.set(i, value.into())
    }

    /// Insert at the end
    pub fn append(&mut self, value: impl Into<Value>) -> Result<()> {
        self.backend.append(value.into())
    }

    /// Insert at the front
    pub fn prepend(&mut self, value: impl Into<Value>) -> Result<()> {
        self.backend.prepend(value.into())
    }

    /// First element; `None` for an empty list
    pub fn head(&self) -> Option<Cow<'_, Value>> {
        if self.is_empty() {
            return None;
        }
        self.backend.head()
    }

    /// All elements but the first
    pub fn tail(&self) -> Result<List> {
        self.backend.tail()
    }

    /// Cursor over the elements in index order
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

    /// Collect every element into a vector
    pub fn to_vec(&self) -> Vec<Value> {
        self.iterator().collect()
    }
}

impl Clone for List {
    fn clone(&self) -> Self {
        List {
            backend: self.backend.boxed_clone(),
        }
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("backend", &self.backend_name())
            .field("size", &self.size())
            .finish()
    }
}

/// Lists are equal when they hold equal elements in the same order,
/// whatever their backends.
impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iterator().eq(other.iterator())
    }
}
