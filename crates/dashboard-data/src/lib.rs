//! Data layer for the AG1 creative dashboard.
//!
//! Locates and reads the CSV export, parses it into creatives, builds the
//! filtered and sorted view and computes the KPI and chart aggregates over it.

pub mod aggregator;
pub mod loader;
pub mod parser;
pub mod view;
pub mod writer;

pub use dashboard_core as core;
