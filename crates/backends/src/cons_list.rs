//! Linked (cons) list backend
//!
//! Cells are immutable and shared through `Arc`. `prepend` and `tail` are
//! O(1): `tail` hands out a view that shares every cell after the head.
//! Writes never modify a cell in place. `set` rebuilds the cells in front of
//! the index and `append` rebuilds the whole chain, so a tail view and the
//! list it came from never see each other's writes.
//!
//! Long chains are unlinked iteratively on drop.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use udfval_core::{Cursor, Error, Limits, List, ListBackend, Result, Value, ValueIterator};

struct Cell {
    value: Value,
    next: Option<Arc<Cell>>,
}

impl Drop for Cell {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(cell) = next {
            match Arc::try_unwrap(cell) {
                Ok(mut cell) => next = cell.next.take(),
                Err(_) => break,
            }
        }
    }
}

/// Persistent singly linked list
#[derive(Clone, Default)]
pub struct ConsList {
    head: Option<Arc<Cell>>,
    len: usize,
    limits: Limits,
}

impl ConsList {
    /// Empty list with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// List holding `values`, in order
    pub fn from_values(values: Vec<Value>) -> Self {
        let mut list = ConsList::new();
        list.len = values.len();
        list.head = link(values.into_iter().rev(), None);
        list
    }

    /// Replace the limits used for growth checks
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    fn cells(&self) -> Cells<'_> {
        Cells {
            cur: self.head.as_deref(),
        }
    }

    fn cell_at(&self, index: usize) -> Option<&Cell> {
        self.cells().nth(index)
    }
}

/// Push `values` (last element first) in front of `rest`
fn link(values: impl Iterator<Item = Value>, rest: Option<Arc<Cell>>) -> Option<Arc<Cell>> {
    values.fold(rest, |next, value| Some(Arc::new(Cell { value, next })))
}

struct Cells<'a> {
    cur: Option<&'a Cell>,
}

impl<'a> Iterator for Cells<'a> {
    type Item = &'a Cell;

    fn next(&mut self) -> Option<&'a Cell> {
        let cell = self.cur?;
        self.cur = cell.next.as_deref();
        Some(cell)
    }
}

impl ListBackend for ConsList {
    fn name(&self) -> &'static str {
        "conslist"
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> Option<Cow<'_, Value>> {
        self.cell_at(index).map(|cell| Cow::Borrowed(&cell.value))
    }

    fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let Some(target) = self.cell_at(index) else {
            return Err(Error::IndexOutOfRange {
                index: index as i64,
                size: self.len,
            });
        };
        let suffix = target.next.clone();
        let prefix: Vec<Value> = self.cells().take(index).map(|c| c.value.clone()).collect();
        let replaced = Some(Arc::new(Cell {
            value,
            next: suffix,
        }));
        self.head = link(prefix.into_iter().rev(), replaced);
        Ok(())
    }

    fn append(&mut self, value: Value) -> Result<()> {
        self.limits.check_list_len(self.len + 1)?;
        let mut values: Vec<Value> = self.cells().map(|c| c.value.clone()).collect();
        values.push(value);
        self.head = link(values.into_iter().rev(), None);
        self.len += 1;
        Ok(())
    }

    fn prepend(&mut self, value: Value) -> Result<()> {
        self.limits.check_list_len(self.len + 1)?;
        let next = self.head.take();
        self.head = Some(Arc::new(Cell { value, next }));
        self.len += 1;
        Ok(())
    }

    fn tail(&self) -> Result<List> {
        let view = match &self.head {
            Some(cell) => ConsList {
                head: cell.next.clone(),
                len: self.len - 1,
                limits: self.limits.clone(),
            },
            None => ConsList::new().with_limits(self.limits.clone()),
        };
        Ok(List::new(view))
    }

    fn iterator(&self) -> Cursor {
        Cursor::new(ConsCursor {
            cur: self.head.clone(),
        })
    }

    fn boxed_clone(&self) -> Box<dyn ListBackend> {
        Box::new(self.clone())
    }
}

impl fmt::Debug for ConsList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.cells().map(|c| &c.value))
            .finish()
    }
}

impl From<ConsList> for List {
    fn from(list: ConsList) -> Self {
        List::new(list)
    }
}

struct ConsCursor {
    cur: Option<Arc<Cell>>,
}

impl ValueIterator for ConsCursor {
    fn has_next(&mut self) -> bool {
        self.cur.is_some()
    }

    fn next_value(&mut self) -> Option<Value> {
        let cell = self.cur.take()?;
        self.cur = cell.next.clone();
        Some(cell.value.clone())
    }
}
