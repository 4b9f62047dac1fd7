//! Data layer for the sales dashboard.
//!
//! Reads the orders CSV, narrows it to the current filter selection, and
//! reduces the result into the KPI and chart tables the dashboard renders.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod reader;

pub use dashboard_core as core;
