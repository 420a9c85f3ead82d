//! Two-element tuple value
//!
//! Maps yield their entries as pairs of (key, value) when iterated.

use crate::hash::combine_ordered;
use crate::value::{render, Value};

/// An owned (first, second) tuple
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    first: Box<Value>,
    second: Box<Value>,
}

impl Pair {
    /// Create a pair, taking ownership of both values
    pub fn new(first: impl Into<Value>, second: impl Into<Value>) -> Self {
        Pair {
            first: Box::new(first.into()),
            second: Box::new(second.into()),
        }
    }

    /// First element
    pub fn first(&self) -> &Value {
        &self.first
    }

    /// Second element
    pub fn second(&self) -> &Value {
        &self.second
    }

    /// Split into owned elements
    pub fn into_parts(self) -> (Value, Value) {
        (*self.first, *self.second)
    }

    /// Kernel hash combining both elements in order
    pub fn hash_value(&self) -> u32 {
        combine_ordered([self.first.hash_value(), self.second.hash_value()])
    }

    /// `(first, second)` rendering
    pub fn stringify(&self) -> String {
        format!("({}, {})", render(&self.first), render(&self.second))
    }
}
