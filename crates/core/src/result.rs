//! Success/failure outcome of a UDF computation
//!
//! `UdfResult` is the value that crosses the computation boundary: either a
//! success carrying the computed value, or a failure carrying a diagnostic
//! value. It always exclusively owns its carried value.
//!
//! The converters (`to_success`, `to_failure`) are the only mutators. Each
//! releases whatever value was held before taking the new one, so a value
//! placed into a result is dropped exactly once.

use crate::value::Value;

/// Outcome of a UDF computation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UdfResult {
    is_success: bool,
    value: Option<Value>,
}

impl UdfResult {
    /// A failure carrying no value
    pub fn new() -> Self {
        Self::default()
    }

    /// A success carrying `value`
    pub fn success(value: impl Into<Value>) -> Self {
        UdfResult {
            is_success: true,
            value: Some(value.into()),
        }
    }

    /// A failure carrying `value`
    pub fn failure(value: impl Into<Value>) -> Self {
        UdfResult {
            is_success: false,
            value: Some(value.into()),
        }
    }

    /// Turn this into a success carrying `value`, releasing the previous value
    pub fn to_success(&mut self, value: impl Into<Value>) -> &mut Self {
        self.replace(true, value.into());
        self
    }

    /// Turn this into a failure carrying `value`, releasing the previous value
    pub fn to_failure(&mut self, value: impl Into<Value>) -> &mut Self {
        self.replace(false, value.into());
        self
    }

    fn replace(&mut self, is_success: bool, value: Value) {
        if let Some(old) = self.value.replace(value) {
            tracing::trace!(
                target: "udfval::result",
                kind = %old.kind(),
                to_success = is_success,
                "Releasing previous result value"
            );
            drop(old);
        }
        self.is_success = is_success;
    }

    /// Check if this is a success
    pub fn is_success(&self) -> bool {
        self.is_success
    }

    /// Check if this is a failure
    pub fn is_failure(&self) -> bool {
        !self.is_success
    }

    /// The carried value, if any
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Take ownership of the carried value
    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// Convert into a standard `Result`, success on the `Ok` side
    pub fn into_std(self) -> Result<Option<Value>, Option<Value>> {
        if self.is_success {
            Ok(self.value)
        } else {
            Err(self.value)
        }
    }
}

impl From<Result<Value, Value>> for UdfResult {
    fn from(r: Result<Value, Value>) -> Self {
        match r {
            Ok(v) => UdfResult::success(v),
            Err(v) => UdfResult::failure(v),
        }
    }
}
