//! Domain model for the AG1 creative dashboard.
//!
//! Holds the creative record, the filter/sort configuration with its French
//! label tables, the error taxonomy, number formatting, the offline sample set
//! and CLI settings.

pub mod error;
pub mod filters;
pub mod formatting;
pub mod labels;
pub mod models;
pub mod samples;
pub mod settings;

pub use error::{DashboardError, Result};
pub use filters::{Choice, ContentType, Dimension, FilterConfig, FilterUpdate, Month, Product, SortOrder, Status};
pub use models::{Creative, CreativeId};
