use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The source file could not be opened or read from disk.
    #[error("Failed to read data file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required column is missing or a value in it could not be parsed.
    ///
    /// `row` is the 1-based data row (header excluded); `None` when the
    /// problem is with the header itself.
    #[error("{}", format_data_error(.path, .row, .column, .reason))]
    DataFormat {
        path: PathBuf,
        row: Option<usize>,
        column: String,
        reason: String,
    },

    /// The delimited content itself is malformed.
    #[error("Malformed CSV data: {0}")]
    Csv(#[from] csv::Error),

    /// A date argument supplied by the user could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A JSON document could not be produced.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Setting up, drawing to, or restoring the terminal failed.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl DashboardError {
    /// Build a [`DashboardError::DataFormat`] for a problem in one cell.
    pub fn data_format(
        path: impl Into<PathBuf>,
        row: Option<usize>,
        column: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::DataFormat {
            path: path.into(),
            row,
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`DashboardError::Terminal`] from any terminal-layer failure.
    pub fn terminal(err: impl std::fmt::Display) -> Self {
        Self::Terminal(err.to_string())
    }

    /// `true` for every failure that aborts the data load: missing or
    /// unreadable file, malformed rows, missing or unparsable columns.
    pub fn is_data_format(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. } | Self::DataFormat { .. } | Self::Csv(_)
        )
    }
}

fn format_data_error(
    path: &std::path::Path,
    row: &Option<usize>,
    column: &str,
    reason: &str,
) -> String {
    match row {
        Some(row) => format!(
            "Invalid data in {} (row {}, column '{}'): {}",
            path.display(),
            row,
            column,
            reason
        ),
        None => format!(
            "Invalid data in {} (column '{}'): {}",
            path.display(),
            column,
            reason
        ),
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
