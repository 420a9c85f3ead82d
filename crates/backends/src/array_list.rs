//! Contiguous array list backend
//!
//! Elements live in one `Arc<Vec<Value>>`. Cloning the backend shares the
//! vector; the first mutation on a shared vector copies it, so clones never
//! observe each other's writes.
//!
//! # Complexity
//!
//! - get/set/append: O(1) amortized (set/append copy once if shared)
//! - prepend: O(n)
//! - tail: O(n), returns an independent copy

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use udfval_core::{Cursor, Error, Limits, List, ListBackend, Result, Value, ValueIterator};

/// Vector-backed list
#[derive(Clone, Default)]
pub struct ArrayList {
    items: Arc<Vec<Value>>,
    limits: Limits,
}

impl ArrayList {
    /// Empty list with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty list with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        ArrayList {
            items: Arc::new(Vec::with_capacity(capacity)),
            limits: Limits::default(),
        }
    }

    /// List holding `values`, in order
    pub fn from_values(values: Vec<Value>) -> Self {
        ArrayList {
            items: Arc::new(values),
            limits: Limits::default(),
        }
    }

    /// Replace the limits used for growth checks
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    fn items_mut(&mut self) -> &mut Vec<Value> {
        Arc::make_mut(&mut self.items)
    }
}

impl ListBackend for ArrayList {
    fn name(&self) -> &'static str {
        "arraylist"
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<Cow<'_, Value>> {
        self.items.get(index).map(Cow::Borrowed)
    }

    fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let size = self.items.len();
        match self.items_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfRange {
                index: index as i64,
                size,
            }),
        }
    }

    fn append(&mut self, value: Value) -> Result<()> {
        self.limits.check_list_len(self.items.len() + 1)?;
        self.items_mut().push(value);
        Ok(())
    }

    fn prepend(&mut self, value: Value) -> Result<()> {
        self.limits.check_list_len(self.items.len() + 1)?;
        self.items_mut().insert(0, value);
        Ok(())
    }

    fn tail(&self) -> Result<List> {
        let rest = self.items.get(1..).unwrap_or_default().to_vec();
        tracing::trace!(target: "udfval::list", copied = rest.len(), "Array list tail copy");
        Ok(List::new(ArrayList {
            items: Arc::new(rest),
            limits: self.limits.clone(),
        }))
    }

    fn iterator(&self) -> Cursor {
        Cursor::new(ArrayCursor {
            items: Arc::clone(&self.items),
            pos: 0,
        })
    }

    fn boxed_clone(&self) -> Box<dyn ListBackend> {
        Box::new(self.clone())
    }
}

impl fmt::Debug for ArrayList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl From<ArrayList> for List {
    fn from(list: ArrayList) -> Self {
        List::new(list)
    }
}

/// Cursor source over a snapshot of the vector
///
/// Holding the `Arc` keeps the snapshot alive; later writes to the list copy
/// the vector instead of touching this one.
struct ArrayCursor {
    items: Arc<Vec<Value>>,
    pos: usize,
}

impl ValueIterator for ArrayCursor {
    fn has_next(&mut self) -> bool {
        self.pos < self.items.len()
    }

    fn next_value(&mut self) -> Option<Value> {
        let v = self.items.get(self.pos)?.clone();
        self.pos += 1;
        Some(v)
    }
}
