//! Terminal UI layer for the sales dashboard.
//!
//! Provides themes, header/KPI/bar components, chart panels, the filter
//! sidebar, the full dashboard layout and its event loop built on top of
//! [`ratatui`], plus the plain-text and JSON report writers.

pub mod app;
pub mod charts;
pub mod components;
pub mod dashboard_view;
pub mod filter_panel;
pub mod report;
pub mod themes;

pub use dashboard_core as core;
