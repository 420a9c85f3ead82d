//! Core value model for the udfval UDF layer
//!
//! This crate defines the types every UDF sees:
//! - ValueKind: closed set of value kinds
//! - Value: the value enum, plus kernel operations on possibly-null handles
//! - Bytes, Pair: concrete scalar and tuple types
//! - List, Map, Record: polymorphic containers over pluggable backends
//! - UdfResult: success/failure outcome of a computation
//! - Cursor, Stream: lazy iteration protocol
//! - Error, Limits, UdfConfig: failures, size limits and configuration
//!
//! Concrete backends live in the `udfval-backends` crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bytes;
pub mod config;
pub mod error;
pub mod hash;
pub mod iterator;
pub mod kind;
pub mod limits;
pub mod list;
pub mod map;
pub mod pair;
pub mod record;
pub mod result;
pub mod stream;
pub mod value;


pub use bytes::{Bytes, BytesType, MAX_BYTES_CAPACITY};
pub use config::{UdfConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use iterator::{Cursor, CursorState, ValueIterator};
pub use kind::ValueKind;
pub use limits::Limits;
pub use list::{List, ListBackend};
pub use map::{Map, MapBackend};
pub use pair::Pair;
pub use record::{Record, RecordBackend, RecordMeta};
pub use result::UdfResult;
pub use stream::{CursorStream, FnStream, ListStream, Stream};
pub use value::Value;
