//! Runtime layer for the sales dashboard.
//!
//! Owns the load-once dataset cache and the interactive session state that
//! sits between the data layer and the UI.

pub mod data_manager;
pub mod session;

pub use dashboard_core as core;
pub use dashboard_data as data;
