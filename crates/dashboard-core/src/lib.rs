//! Shared domain layer for the sales dashboard.
//!
//! Order records, the immutable order set, filter selections, the error
//! taxonomy, number formatting, date helpers and CLI settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{DashboardError, Result};
