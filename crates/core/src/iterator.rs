//! Lazy value iteration
//!
//! Producers implement [`ValueIterator`]; consumers hold a [`Cursor`], the
//! owned handle that tracks the pull state machine:
//!
//! ```text
//! Created --has_next? yes--> Yielding --...--> Exhausted
//!    \_____________has_next? no______________/
//! ```
//!
//! ## Rules
//!
//! - `has_next` never consumes an element. Sources may buffer one element to
//!   answer it, so it takes `&mut self`, but repeated calls agree.
//! - `next_value` with nothing left returns `None`; it never panics.
//! - A cursor that reached `Exhausted` stays there, even if its source would
//!   produce more later.
//! - Cursors are single-pass. Ask the producer for a new one to restart.

use std::fmt;
use std::vec;

use crate::value::Value;

/// Pull-based producer of values
pub trait ValueIterator: Send {
    /// Whether another value is available
    fn has_next(&mut self) -> bool;

    /// Take the next value; `None` once the source is drained
    fn next_value(&mut self) -> Option<Value>;
}

/// Position of a cursor in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Nothing pulled yet
    Created,
    /// At least one value has been yielded and more may follow
    Yielding,
    /// Drained; no value will ever be yielded again
    Exhausted,
}

/// Owned, single-pass iterator handle
pub struct Cursor {
    source: Box<dyn ValueIterator>,
    state: CursorState,
    yielded: u64,
}

impl Cursor {
    /// Wrap a source
    pub fn new(source: impl ValueIterator + 'static) -> Self {
        Cursor {
            source: Box::new(source),
            state: CursorState::Created,
            yielded: 0,
        }
    }

    /// A cursor that yields nothing
    pub fn empty() -> Self {
        Cursor::from_values(Vec::new())
    }

    /// A cursor that yields exactly one value
    pub fn once(value: Value) -> Self {
        Cursor::from_values(vec![value])
    }

    /// A cursor over owned values, in order
    pub fn from_values(values: Vec<Value>) -> Self {
        Cursor::new(VecSource {
            values: values.into_iter(),
        })
    }

    /// A cursor driven by a generator closure
    ///
    /// The closure is called lazily, at most once per element, and never
    /// again after it returns `None`. Infinite generators are fine.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut() -> Option<Value> + Send + 'static,
    {
        Cursor::new(FnSource {
            f,
            peeked: None,
            done: false,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Number of values yielded so far
    pub fn yielded(&self) -> u64 {
        self.yielded
    }

    /// Whether another value is available
    pub fn has_next(&mut self) -> bool {
        if self.state == CursorState::Exhausted {
            return false;
        }
        let more = self.source.has_next();
        if !more {
            self.state = CursorState::Exhausted;
        }
        more
    }

    /// Take the next value; `None` when exhausted
    pub fn next_value(&mut self) -> Option<Value> {
        if !self.has_next() {
            return None;
        }
        match self.source.next_value() {
            Some(v) => {
                self.state = CursorState::Yielding;
                self.yielded += 1;
                Some(v)
            }
            None => {
                self.state = CursorState::Exhausted;
                None
            }
        }
    }

    /// Transform every value
    pub fn map<F>(self, f: F) -> Cursor
    where
        F: FnMut(Value) -> Value + Send + 'static,
    {
        Cursor::new(MapSource { inner: self, f })
    }

    /// Keep only values matching `predicate`
    pub fn filter<P>(self, predicate: P) -> Cursor
    where
        P: FnMut(&Value) -> bool + Send + 'static,
    {
        Cursor::new(FilterSource {
            inner: self,
            predicate,
            peeked: None,
        })
    }

    /// Yield at most `n` values
    pub fn take(self, n: usize) -> Cursor {
        Cursor::new(TakeSource {
            inner: self,
            remaining: n,
        })
    }

    /// Drop the first `n` values
    pub fn skip(self, n: usize) -> Cursor {
        Cursor::new(SkipSource {
            inner: self,
            pending: n,
        })
    }

    /// Yield everything from `self`, then everything from `next`
    pub fn chain(self, next: Cursor) -> Cursor {
        Cursor::new(ChainSource {
            first: Some(self),
            second: next,
        })
    }
}

impl ValueIterator for Cursor {
    fn has_next(&mut self) -> bool {
        Cursor::has_next(self)
    }

    fn next_value(&mut self) -> Option<Value> {
        Cursor::next_value(self)
    }
}

impl Iterator for Cursor {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.next_value()
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("state", &self.state)
            .field("yielded", &self.yielded)
            .finish()
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        if self.state != CursorState::Exhausted {
            tracing::trace!(
                target: "udfval::iterator",
                yielded = self.yielded,
                "Cursor abandoned before exhaustion"
            );
        }
    }
}

// ============================================================================
// Sources
// ============================================================================

struct VecSource {
    values: vec::IntoIter<Value>,
}

impl ValueIterator for VecSource {
    fn has_next(&mut self) -> bool {
        !self.values.as_slice().is_empty()
    }

    fn next_value(&mut self) -> Option<Value> {
        self.values.next()
    }
}

struct FnSource<F> {
    f: F,
    peeked: Option<Value>,
    done: bool,
}

impl<F> ValueIterator for FnSource<F>
where
    F: FnMut() -> Option<Value> + Send,
{
    fn has_next(&mut self) -> bool {
        if self.peeked.is_none() && !self.done {
            self.peeked = (self.f)();
            self.done = self.peeked.is_none();
        }
        self.peeked.is_some()
    }

    fn next_value(&mut self) -> Option<Value> {
        if self.has_next() {
            self.peeked.take()
        } else {
            None
        }
    }
}

struct MapSource<F> {
    inner: Cursor,
    f: F,
}

impl<F> ValueIterator for MapSource<F>
where
    F: FnMut(Value) -> Value + Send,
{
    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn next_value(&mut self) -> Option<Value> {
        self.inner.next_value().map(&mut self.f)
    }
}

struct FilterSource<P> {
    inner: Cursor,
    predicate: P,
    peeked: Option<Value>,
}

impl<P> ValueIterator for FilterSource<P>
where
    P: FnMut(&Value) -> bool + Send,
{
    fn has_next(&mut self) -> bool {
        while self.peeked.is_none() {
            match self.inner.next_value() {
                Some(v) if (self.predicate)(&v) => self.peeked = Some(v),
                Some(_) => continue,
                None => return false,
            }
        }
        true
    }

    fn next_value(&mut self) -> Option<Value> {
        if self.has_next() {
            self.peeked.take()
        } else {
            None
        }
    }
}

struct TakeSource {
    inner: Cursor,
    remaining: usize,
}

impl ValueIterator for TakeSource {
    fn has_next(&mut self) -> bool {
        self.remaining > 0 && self.inner.has_next()
    }

    fn next_value(&mut self) -> Option<Value> {
        if self.remaining == 0 {
            return None;
        }
        let v = self.inner.next_value()?;
        self.remaining -= 1;
        Some(v)
    }
}

struct SkipSource {
    inner: Cursor,
    pending: usize,
}

impl SkipSource {
    fn settle(&mut self) {
        while self.pending > 0 && self.inner.next_value().is_some() {
            self.pending -= 1;
        }
        self.pending = 0;
    }
}

impl ValueIterator for SkipSource {
    fn has_next(&mut self) -> bool {
        self.settle();
        self.inner.has_next()
    }

    fn next_value(&mut self) -> Option<Value> {
        self.settle();
        self.inner.next_value()
    }
}

struct ChainSource {
    first: Option<Cursor>,
    second: Cursor,
}

impl ValueIterator for ChainSource {
    fn has_next(&mut self) -> bool {
        if let Some(first) = self.first.as_mut() {
            if first.has_next() {
                return true;
            }
            self.first = None;
        }
        self.second.has_next()
    }

    fn next_value(&mut self) -> Option<Value> {
        if self.has_next() {
            match self.first.as_mut() {
                Some(first) => first.next_value(),
                None => self.second.next_value(),
            }
        } else {
            None
        }
    }
}
