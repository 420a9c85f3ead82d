//! Value kind enumeration
//!
//! Every value handle reports exactly one kind. The kind is fixed by the
//! `Value` variant at construction and is the only basis for downcasting.
//!
//! ## The Kinds
//!
//! | Kind | Payload | Footprint |
//! |------|---------|-----------|
//! | Unknown | none (null handle) | 0 |
//! | Empty | none | 0 |
//! | Boolean | `bool` | 1 |
//! | Integer | `i64` | 8 |
//! | String | `String` | handle |
//! | Bytes | [`Bytes`] | handle |
//! | List | [`List`] | handle |
//! | Map | [`Map`] | handle |
//! | Record | [`Record`] | handle |
//! | Pair | [`Pair`] | handle |

use serde::{Deserialize, Serialize};
use std::mem;

use crate::bytes::Bytes;
use crate::list::List;
use crate::map::Map;
use crate::pair::Pair;
use crate::record::Record;

/// Discriminant of a value handle
///
/// `Unknown` is reserved for the null handle: no constructed value ever
/// reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Null handle or unrecognised value
    Unknown,
    /// The empty (nil) value
    Empty,
    /// Boolean scalar
    Boolean,
    /// 64-bit signed integer scalar
    Integer,
    /// UTF-8 string scalar
    String,
    /// Typed byte buffer
    Bytes,
    /// Ordered sequence
    List,
    /// Key/value association
    Map,
    /// Named-bin database record
    Record,
    /// Two-element tuple
    Pair,
}

impl ValueKind {
    /// All kinds (for iteration)
    pub const ALL: [ValueKind; 10] = [
        ValueKind::Unknown,
        ValueKind::Empty,
        ValueKind::Boolean,
        ValueKind::Integer,
        ValueKind::String,
        ValueKind::Bytes,
        ValueKind::List,
        ValueKind::Map,
        ValueKind::Record,
        ValueKind::Pair,
    ];

    /// Human-readable display name
    pub const fn name(&self) -> &'static str {
        match self {
            ValueKind::Unknown => "Unknown",
            ValueKind::Empty => "Empty",
            ValueKind::Boolean => "Boolean",
            ValueKind::Integer => "Integer",
            ValueKind::String => "String",
            ValueKind::Bytes => "Bytes",
            ValueKind::List => "List",
            ValueKind::Map => "Map",
            ValueKind::Record => "Record",
            ValueKind::Pair => "Pair",
        }
    }

    /// Short identifier used by adapters
    pub const fn id(&self) -> &'static str {
        match self {
            ValueKind::Unknown => "unknown",
            ValueKind::Empty => "nil",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::String => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::Record => "record",
            ValueKind::Pair => "pair",
        }
    }

    /// Parse from short identifier
    pub fn from_id(id: &str) -> Option<Self> {
        ValueKind::ALL.iter().copied().find(|k| k.id() == id)
    }

    /// Declared byte footprint of a value of this kind
    ///
    /// Scalars report their payload width; containers report the size of
    /// their handle, not of the backing store behind it.
    pub const fn footprint(&self) -> usize {
        match self {
            ValueKind::Unknown | ValueKind::Empty => 0,
            ValueKind::Boolean => mem::size_of::<bool>(),
            ValueKind::Integer => mem::size_of::<i64>(),
            ValueKind::String => mem::size_of::<String>(),
            ValueKind::Bytes => mem::size_of::<Bytes>(),
            ValueKind::List => mem::size_of::<List>(),
            ValueKind::Map => mem::size_of::<Map>(),
            ValueKind::Record => mem::size_of::<Record>(),
            ValueKind::Pair => mem::size_of::<Pair>(),
        }
    }

    /// Check if values of this kind own other values
    pub const fn is_container(&self) -> bool {
        matches!(
            self,
            ValueKind::List | ValueKind::Map | ValueKind::Record | ValueKind::Pair
        )
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
