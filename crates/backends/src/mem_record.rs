//! In-memory record backend
//!
//! Bins live in an `FxHashMap` owned by the record. Reads lend references
//! (`Cow::Borrowed`). Installs every optional hook except `meta`; `hash`
//! comes from the bin-derived default.

use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::fmt;

use udfval_core::{Limits, Record, RecordBackend, Result, Value};

/// Record with bins held in memory
#[derive(Clone, Default)]
pub struct MemRecord {
    bins: FxHashMap<String, Value>,
    limits: Limits,
}

impl MemRecord {
    /// Empty record with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the limits used for bin checks
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    fn sorted_bins(&self) -> Vec<(&String, &Value)> {
        let mut bins: Vec<_> = self.bins.iter().collect();
        bins.sort_unstable_by(|a, b| a.0.cmp(b.0));
        bins
    }
}

impl RecordBackend for MemRecord {
    fn name(&self) -> &'static str {
        "memrecord"
    }

    fn get(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.bins.get(name).map(Cow::Borrowed)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        self.limits.validate_bin_name(name)?;
        if let Some(slot) = self.bins.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        self.limits.check_bins(self.bins.len() + 1)?;
        self.bins.insert(name.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<Option<Value>> {
        Ok(self.bins.remove(name))
    }

    fn bin_names(&self) -> Option<Vec<String>> {
        Some(self.sorted_bins().into_iter().map(|(n, _)| n.clone()).collect())
    }

    fn stringify(&self) -> Option<String> {
        let parts: Vec<String> = self
            .sorted_bins()
            .into_iter()
            .map(|(n, v)| {
                let rendered = v.stringify().unwrap_or_else(|| v.kind().name().to_string());
                format!("{}: {}", n, rendered)
            })
            .collect();
        Some(format!("{{{}}}", parts.join(", ")))
    }

    fn boxed_clone(&self) -> Box<dyn RecordBackend> {
        Box::new(self.clone())
    }
}

impl fmt::Debug for MemRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.sorted_bins()).finish()
    }
}

impl From<MemRecord> for Record {
    fn from(record: MemRecord) -> Self {
        Record::new(record)
    }
}
