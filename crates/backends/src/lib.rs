//! Concrete backends for the udfval value model
//!
//! This crate implements the backend traits from `udfval-core`:
//! - ArrayList: contiguous list, tail is a copy
//! - ConsList: persistent linked list, tail is a shared view
//! - HashedMap: map bucketed by kernel hash
//! - MemRecord: record with bins held in memory
//! - RecordStore / StoredRecord / RecordScan: records living in a store,
//!   accessed through handles, plus a stream over the whole store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array_list;
pub mod cons_list;
pub mod hash_map;
pub mod mem_record;
pub mod store;

pub use array_list::ArrayList;
pub use cons_list::ConsList;
pub use hash_map::HashedMap;
pub use mem_record::MemRecord;
pub use store::{RecordScan, RecordStore, StoredRecord};

use udfval_core::{List, Map, Record, Value};

/// Array list holding `values`
pub fn array_list(values: Vec<Value>) -> List {
    ArrayList::from_values(values).into()
}

/// Cons list holding `values`
pub fn cons_list(values: Vec<Value>) -> List {
    ConsList::from_values(values).into()
}

/// Empty hash map
pub fn hash_map() -> Map {
    HashedMap::new().into()
}

/// Empty in-memory record
pub fn mem_record() -> Record {
    MemRecord::new().into()
}
