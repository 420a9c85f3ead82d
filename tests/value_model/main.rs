//! Value Model Test Suite
//!
//! Contract tests run against every shipped backend, plus the end-to-end
//! scenarios a UDF would drive.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test value_model
//!
//! # List contract only
//! cargo test --test value_model list::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod iterator;
mod kernel;
mod list;
mod record;
mod result;
mod scenarios;
