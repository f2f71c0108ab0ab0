//! Runtime layer for the AG1 creative dashboard.
//!
//! Holds the aggregation engine state machine and the async coordinator that
//! drives it: debounced recomputation, cancelable loads and snapshot delivery.

pub mod coordinator;
pub mod engine;

pub use dashboard_core as core;
pub use dashboard_data as data;
