//! Streams: producers of cursors
//!
//! A [`Stream`] exposes exactly one capability: hand out a [`Cursor`] over its
//! elements. Asking twice is not guaranteed to replay the same sequence;
//! check [`Stream::is_restartable`].

use parking_lot::Mutex;
use std::fmt;

use crate::iterator::Cursor;
use crate::list::List;

/// Producer of cursors
pub trait Stream: Send + Sync {
    /// Cursor over this stream's elements
    fn iterator(&self) -> Cursor;

    /// Whether every call to `iterator` replays the full sequence
    fn is_restartable(&self) -> bool {
        false
    }
}

/// Restartable stream over the elements of a list
#[derive(Debug, Clone)]
pub struct ListStream {
    list: List,
}

impl ListStream {
    /// Stream the given list
    pub fn new(list: List) -> Self {
        ListStream { list }
    }

    /// The streamed list
    pub fn list(&self) -> &List {
        &self.list
    }
}

impl Stream for ListStream {
    fn iterator(&self) -> Cursor {
        self.list.iterator()
    }

    fn is_restartable(&self) -> bool {
        true
    }
}

/// Single-shot stream wrapping one cursor
///
/// The first call to `iterator` hands the cursor out; every later call gets
/// an empty cursor.
pub struct CursorStream {
    cursor: Mutex<Option<Cursor>>,
}

impl CursorStream {
    /// Wrap a cursor
    pub fn new(cursor: Cursor) -> Self {
        CursorStream {
            cursor: Mutex::new(Some(cursor)),
        }
    }

    /// Whether the cursor has already been handed out
    pub fn is_consumed(&self) -> bool {
        self.cursor.lock().is_none()
    }
}

impl Stream for CursorStream {
    fn iterator(&self) -> Cursor {
        self.cursor.lock().take().unwrap_or_else(|| {
            tracing::debug!(target: "udfval::stream", "Single-shot stream already consumed");
            Cursor::empty()
        })
    }
}

impl fmt::Debug for CursorStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorStream")
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

/// Restartable stream that builds a fresh cursor on every request
pub struct FnStream<F> {
    make: F,
}

impl<F> FnStream<F>
where
    F: Fn() -> Cursor + Send + Sync,
{
    /// Stream backed by a cursor factory
    pub fn new(make: F) -> Self {
        FnStream { make }
    }
}

impl<F> Stream for FnStream<F>
where
    F: Fn() -> Cursor + Send + Sync,
{
    fn iterator(&self) -> Cursor {
        (self.make)()
    }

    fn is_restartable(&self) -> bool {
        true
    }
}
