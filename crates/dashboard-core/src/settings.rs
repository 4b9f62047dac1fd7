use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::{FilterSelection, OrderSet};
use crate::time_utils::parse_date_arg;

/// Default dataset file name, looked up relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "finalProj_df.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sales and promotion analytics dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-dashboard",
    about = "Sales and promotion analytics dashboard for e-commerce order data",
    version
)]
pub struct Settings {
    /// Path to the orders CSV file
    #[arg(long, env = "SALES_DASHBOARD_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Output mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "report", "json"])]
    pub view: String,

    /// First order date to include (YYYY-MM-DD); defaults to the earliest order
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last order date to include (YYYY-MM-DD); defaults to the latest order
    #[arg(long)]
    pub end_date: Option<String>,

    /// Restrict to a product category (repeatable)
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Restrict to a payment method (repeatable)
    #[arg(long = "payment", value_name = "NAME")]
    pub payment_methods: Vec<String>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments from the process environment and apply the
    /// `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Build the first filter selection for `orders`.
    ///
    /// Dates not given on the command line fall back to the dataset's
    /// earliest/latest order date; category and payment flags become the
    /// initial multi-select contents.
    pub fn initial_selection(&self, orders: &OrderSet) -> Result<FilterSelection> {
        let mut selection = FilterSelection::for_orders(orders)
            .with_categories(self.categories.iter().cloned())
            .with_payment_methods(self.payment_methods.iter().cloned());

        if let Some(start) = &self.start_date {
            selection.start_date = parse_date_arg(start)?;
        }
        if let Some(end) = &self.end_date {
            selection.end_date = parse_date_arg(end)?;
        }

        Ok(selection)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::OrderRecord;
    use crate::time_utils::parse_datetime;
    use chrono::NaiveDate;

    fn sample_orders() -> OrderSet {
        let reg = parse_datetime("2023-06-01").unwrap();
        OrderSet::new(vec![
            OrderRecord::new(parse_datetime("2024-01-05").unwrap(), reg, "A", "card", "c1", 100.0, 10.0),
            OrderRecord::new(parse_datetime("2024-03-20").unwrap(), reg, "B", "cash", "c2", 200.0, 0.0),
        ])
    }

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["sales-dashboard"]);

        assert_eq!(settings.view, "dashboard");
        assert_eq!(settings.theme, "auto");
        assert!(settings.start_date.is_none());
        assert!(settings.end_date.is_none());
        assert!(settings.categories.is_empty());
        assert!(settings.payment_methods.is_empty());
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_repeatable_filters() {
        let settings = Settings::parse_from([
            "sales-dashboard",
            "--category",
            "Mobiles",
            "--category",
            "Books",
            "--payment",
            "cod",
        ]);
        assert_eq!(settings.categories, vec!["Mobiles", "Books"]);
        assert_eq!(settings.payment_methods, vec!["cod"]);
    }

    #[test]
    fn test_settings_cli_data_file_and_view() {
        let settings = Settings::parse_from([
            "sales-dashboard",
            "--data-file",
            "/tmp/orders.csv",
            "--view",
            "report",
        ]);
        assert_eq!(settings.data_file, PathBuf::from("/tmp/orders.csv"));
        assert_eq!(settings.view, "report");
    }

    #[test]
    fn test_settings_rejects_unknown_view() {
        let parsed = Settings::try_parse_from(["sales-dashboard", "--view", "pie"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let settings = Settings::load_from_args(["sales-dashboard", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_initial_selection_defaults_to_dataset_bounds() {
        let settings = Settings::parse_from(["sales-dashboard"]);
        let selection = settings.initial_selection(&sample_orders()).unwrap();
        assert_eq!(selection.start_date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(selection.end_date, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert!(selection.categories.is_empty());
    }

    #[test]
    fn test_initial_selection_applies_cli_overrides() {
        let settings = Settings::parse_from([
            "sales-dashboard",
            "--start-date",
            "2024-02-01",
            "--category",
            "A",
            "--payment",
            "card",
        ]);
        let selection = settings.initial_selection(&sample_orders()).unwrap();
        assert_eq!(selection.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(selection.end_date, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert!(selection.categories.contains("A"));
        assert!(selection.payment_methods.contains("card"));
    }

    #[test]
    fn test_initial_selection_bad_date() {
        let settings = Settings::parse_from(["sales-dashboard", "--end-date", "March"]);
        let err = settings.initial_selection(&sample_orders()).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidDate(_)));
    }
}
