//! Value kernel
//!
//! This module defines:
//! - `Value`: the closed sum of every value kind the UDF layer handles
//! - Kernel operations that work on any handle, including the null handle
//!
//! ## Dispatch
//!
//! Scalars carry their payload inline. Containers (`List`, `Map`, `Record`)
//! hold a boxed backend trait object; the kernel calls the handle, the handle
//! calls the backend. Nothing here switches on backend type, so a new backend
//! never touches this file.
//!
//! ## Null Handles
//!
//! The free functions take `Option<&Value>`. `None` stands for the null handle
//! and always produces the documented neutral result:
//!
//! | op | null / absent hook |
//! |----|--------------------|
//! | `kind_of` | `Unknown` |
//! | `size_of` | `size_of::<Value>()` |
//! | `hash_of` | `0` |
//! | `stringify` | `None` |
//! | `destroy` | `false` (not destroyable) |

use crate::bytes::Bytes;
use crate::hash::hash_bytes;
use crate::kind::ValueKind;
use crate::list::List;
use crate::map::Map;
use crate::pair::Pair;
use crate::record::Record;

/// Any value the UDF layer can hold
///
/// The variant is the kind: it is fixed at construction and is the only
/// basis for downcasting with the `as_*` accessors.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The empty (nil) value
    Empty,
    /// Boolean scalar
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// UTF-8 string
    String(String),
    /// Typed byte buffer
    Bytes(Bytes),
    /// Polymorphic ordered sequence
    List(List),
    /// Polymorphic key/value association
    Map(Map),
    /// Polymorphic named-bin record
    Record(Record),
    /// Two-element tuple
    Pair(Pair),
}

impl Value {
    /// Kind tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty => ValueKind::Empty,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Record(_) => ValueKind::Record,
            Value::Pair(_) => ValueKind::Pair,
        }
    }

    /// Declared footprint of this value's kind
    pub fn size(&self) -> usize {
        self.kind().footprint()
    }

    /// Kernel hash
    ///
    /// Returns `0` when the value's backend installs no hash hook.
    pub fn hash_value(&self) -> u32 {
        match self {
            Value::Empty => 0,
            Value::Boolean(b) => hash_bytes(&[*b as u8]),
            Value::Integer(i) => hash_bytes(&i.to_be_bytes()),
            Value::String(s) => hash_bytes(s.as_bytes()),
            Value::Bytes(b) => b.hash_value(),
            Value::List(l) => l.hash_value(),
            Value::Map(m) => m.hash_value(),
            Value::Record(r) => r.hash_value(),
            Value::Pair(p) => p.hash_value(),
        }
    }

    /// Kernel string rendering
    ///
    /// Returns `None` when the value's backend installs no stringify hook.
    pub fn stringify(&self) -> Option<String> {
        match self {
            Value::Empty => Some("NIL".to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Integer(i) => Some(i.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Bytes(b) => Some(b.stringify()),
            Value::List(l) => l.stringify(),
            Value::Map(m) => m.stringify(),
            Value::Record(r) => r.stringify(),
            Value::Pair(p) => Some(p.stringify()),
        }
    }

    /// Get the kind name as a string
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Check if this is the empty value
    pub fn is_empty_value(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Get as bool if this is a Boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as &str if this is a String
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &Bytes if this is a Bytes value
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get as &List if this is a List
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get as &mut List if this is a List
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get as &Map if this is a Map
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get as &mut Map if this is a Map
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get as &Record if this is a Record
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Get as &mut Record if this is a Record
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Get as &Pair if this is a Pair
    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Value::Pair(p) => Some(p),
            _ => None,
        }
    }

    /// Take the List out of this value
    pub fn into_list(self) -> Option<List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Take the Record out of this value
    pub fn into_record(self) -> Option<Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }
}

/// Render a nested value, falling back to its kind name when stringify is absent
pub(crate) fn render(value: &Value) -> String {
    value
        .stringify()
        .unwrap_or_else(|| value.kind().name().to_string())
}

// ============================================================================
// Kernel operations on possibly-null handles
// ============================================================================

/// Kind of a handle; `Unknown` for the null handle
pub fn kind_of(value: Option<&Value>) -> ValueKind {
    value.map_or(ValueKind::Unknown, Value::kind)
}

/// Declared footprint of a handle
///
/// For the null handle this is the size of the handle type itself, so callers
/// can use it in arithmetic without a null check.
pub fn size_of(value: Option<&Value>) -> usize {
    value.map_or(std::mem::size_of::<Value>(), Value::size)
}

/// Kernel hash of a handle; `0` for the null handle
pub fn hash_of(value: Option<&Value>) -> u32 {
    value.map_or(0, Value::hash_value)
}

/// String rendering of a handle; `None` for the null handle
pub fn stringify(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::stringify)
}

/// Release a handle and everything it owns
///
/// Returns `false` for the null handle ("not destroyable"). Teardown of the
/// backing store runs through the backend's `Drop`, exactly once.
pub fn destroy(value: Option<Value>) -> bool {
    match value {
        Some(v) => {
            drop(v);
            true
        }
        None => false,
    }
}

// ============================================================================
// From implementations for ergonomic construction
// ============================================================================

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Empty
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<Pair> for Value {
    fn from(p: Pair) -> Self {
        Value::Pair(p)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Empty, Into::into)
    }
}
