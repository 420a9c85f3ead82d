//! Size limits for containers and bin names
//!
//! Backends check these before growing. A rejected operation returns
//! `CapacityExceeded` (or `InvalidBinName`) and leaves the container
//! unchanged. Limits are loaded from the `[limits]` table of `udfval.toml`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Size limits enforced by the shipped backends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum list length (default: 1M elements)
    pub max_list_len: usize,

    /// Maximum map entries (default: 1M entries)
    pub max_map_entries: usize,

    /// Maximum bins per record (default: 32767)
    pub max_bins: usize,

    /// Maximum bin name length in bytes (default: 15)
    pub max_bin_name_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_list_len: 1_000_000,
            max_map_entries: 1_000_000,
            max_bins: 32_767,
            max_bin_name_len: 15,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        Limits {
            max_list_len: 8,
            max_map_entries: 8,
            max_bins: 4,
            max_bin_name_len: 8,
        }
    }

    /// Validate a bin name
    ///
    /// Names must be non-empty, at most `max_bin_name_len` bytes, and free of
    /// NUL bytes.
    pub fn validate_bin_name(&self, name: &str) -> Result<()> {
        let reason = if name.is_empty() {
            "bin name is empty".to_string()
        } else if name.len() > self.max_bin_name_len {
            format!(
                "bin name is {} bytes, max {}",
                name.len(),
                self.max_bin_name_len
            )
        } else if name.contains('\0') {
            "bin name contains NUL byte".to_string()
        } else {
            return Ok(());
        };
        tracing::debug!(target: "udfval::limits", name, %reason, "Rejected bin name");
        Err(Error::InvalidBinName {
            name: name.to_string(),
            reason,
        })
    }

    /// Check that a list may grow to `requested` elements
    pub fn check_list_len(&self, requested: usize) -> Result<()> {
        check("list elements", self.max_list_len, requested)
    }

    /// Check that a map may grow to `requested` entries
    pub fn check_map_entries(&self, requested: usize) -> Result<()> {
        check("map entries", self.max_map_entries, requested)
    }

    /// Check that a record may grow to `requested` bins
    pub fn check_bins(&self, requested: usize) -> Result<()> {
        check("record bins", self.max_bins, requested)
    }
}

fn check(resource: &str, limit: usize, requested: usize) -> Result<()> {
    if requested <= limit {
        return Ok(());
    }
    tracing::debug!(
        target: "udfval::limits",
        resource,
        limit,
        requested,
        "Capacity exceeded"
    );
    Err(Error::CapacityExceeded {
        resource: resource.to_string(),
        limit,
        requested,
    })
}
