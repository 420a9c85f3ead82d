//! udfval - polymorphic value model for an embedded database UDF layer
//!
//! UDF code sees one closed set of value kinds (scalars, bytes, lists, maps,
//! records, pairs) and never the storage behind them. Containers dispatch to
//! pluggable backends, so a new storage layout is a new backend, not a change
//! to the kernel.
//!
//! # Quick Start
//!
//! ```
//! use udfval::{array_list, hash_of, UdfResult, Value};
//!
//! let mut list = array_list(vec![Value::from(1), Value::from(2)]);
//! list.append(3).unwrap();
//! assert_eq!(list.stringify().as_deref(), Some("[1, 2, 3]"));
//!
//! let out = UdfResult::success(list);
//! assert!(out.is_success());
//! assert_ne!(hash_of(out.value()), 0);
//! ```
//!
//! # Architecture
//!
//! - `udfval-core`: value kernel, container handles, backend traits,
//!   result wrapper, iteration protocol, errors, limits and config
//! - `udfval-backends`: array and cons lists, hash map, in-memory record,
//!   record store

pub use udfval_backends::*;
pub use udfval_core::value::{destroy, hash_of, kind_of, size_of, stringify};
pub use udfval_core::*;
