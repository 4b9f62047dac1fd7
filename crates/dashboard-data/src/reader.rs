//! CSV loading for the sales dashboard.
//!
//! Reads the orders file once, parses both date columns and the numeric
//! measures, and derives the month bucket of every order. Any missing or
//! unparsable required value aborts the load.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use chrono::NaiveDateTime;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{OrderRecord, OrderSet};
use dashboard_core::time_utils::parse_datetime;
use tracing::{debug, info};

// ── Column names ──────────────────────────────────────────────────────────────

pub const COL_ORDER_DATE: &str = "order_date";
pub const COL_REGISTERED_DATE: &str = "registered_date";
pub const COL_CATEGORY: &str = "category";
pub const COL_PAYMENT_METHOD: &str = "payment_method";
pub const COL_CUSTOMER_ID: &str = "customer_id";
pub const COL_AFTER_DISCOUNT: &str = "after_discount";
pub const COL_DISCOUNT_AMOUNT: &str = "discount_amount";

/// Columns every input file must carry. Any others are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_ORDER_DATE,
    COL_REGISTERED_DATE,
    COL_CATEGORY,
    COL_PAYMENT_METHOD,
    COL_CUSTOMER_ID,
    COL_AFTER_DISCOUNT,
    COL_DISCOUNT_AMOUNT,
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the orders file at `path`.
///
/// Fails with [`DashboardError::FileRead`] when the file cannot be opened and
/// with [`DashboardError::DataFormat`] / [`DashboardError::Csv`] when a
/// required column is missing or any row holds an unparsable value.
pub fn load_orders(path: &Path) -> Result<OrderSet> {
    let started = Instant::now();

    let file = std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let orders = parse_orders(std::io::BufReader::new(file), path)?;

    info!(
        "Loaded {} orders from {} in {:.1} ms",
        orders.len(),
        path.display(),
        started.elapsed().as_secs_f64() * 1000.0
    );

    Ok(orders)
}

/// Parse orders from any reader. `source` is only used in error messages.
pub fn parse_orders<R: Read>(reader: R, source: &Path) -> Result<OrderSet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(csv_reader.headers()?, source)?;

    let mut records: Vec<OrderRecord> = Vec::new();
    for (row_index, row) in csv_reader.records().enumerate() {
        let row = row?;
        let row_number = row_index + 1;
        let cells = RowCells {
            record: &row,
            columns: &columns,
            source,
            row_number,
        };

        records.push(OrderRecord::new(
            cells.datetime(COL_ORDER_DATE)?,
            cells.datetime(COL_REGISTERED_DATE)?,
            cells.text(COL_CATEGORY),
            cells.text(COL_PAYMENT_METHOD),
            cells.text(COL_CUSTOMER_ID),
            cells.number(COL_AFTER_DISCOUNT)?,
            cells.number(COL_DISCOUNT_AMOUNT)?,
        ));
    }

    debug!("Parsed {} rows from {}", records.len(), source.display());

    Ok(OrderSet::new(records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Position of each required column in the header row.
struct ColumnIndex(HashMap<&'static str, usize>);

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord, source: &Path) -> Result<Self> {
        let mut index = HashMap::new();
        for required in REQUIRED_COLUMNS {
            let position = headers
                .iter()
                .position(|h| h == *required)
                .ok_or_else(|| {
                    DashboardError::data_format(source, None, *required, "required column is missing")
                })?;
            index.insert(*required, position);
        }
        Ok(Self(index))
    }

    fn get(&self, column: &str) -> usize {
        // Every lookup uses a name from REQUIRED_COLUMNS, all checked above.
        self.0.get(column).copied().unwrap_or(usize::MAX)
    }
}

/// One data row plus the context needed to report a bad cell.
struct RowCells<'a> {
    record: &'a csv::StringRecord,
    columns: &'a ColumnIndex,
    source: &'a Path,
    row_number: usize,
}

impl RowCells<'_> {
    fn raw(&self, column: &str) -> &str {
        self.record
            .get(self.columns.get(column))
            .map(str::trim)
            .unwrap_or("")
    }

    fn error(&self, column: &str, reason: String) -> DashboardError {
        DashboardError::data_format(self.source, Some(self.row_number), column, reason)
    }

    fn text(&self, column: &str) -> String {
        self.raw(column).to_string()
    }

    fn datetime(&self, column: &str) -> Result<NaiveDateTime> {
        let raw = self.raw(column);
        parse_datetime(raw).ok_or_else(|| self.error(column, format!("cannot parse '{}' as a date", raw)))
    }

    fn number(&self, column: &str) -> Result<f64> {
        let raw = self.raw(column);
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(self.error(column, format!("cannot parse '{}' as a number", raw))),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str =
        "id,order_date,registered_date,category,payment_method,customer_id,after_discount,discount_amount";

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn parse(content: &str) -> Result<OrderSet> {
        parse_orders(content.as_bytes(), Path::new("inline.csv"))
    }

    // ── load_orders ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_orders_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "orders.csv",
            &[
                HEADER,
                "1,2024-01-05,2023-12-01,A,card,cust1,100,10",
                "2,2024-01-20,2023-11-15,B,cash,cust2,200,0",
                "3,2024-02-01,2023-12-01,A,card,cust1,50,5",
            ],
        );

        let orders = load_orders(&path).unwrap();
        assert_eq!(orders.len(), 3);

        let first = &orders.records()[0];
        assert_eq!(first.category, "A");
        assert_eq!(first.payment_method, "card");
        assert_eq!(first.customer_id, "cust1");
        assert!((first.after_discount - 100.0).abs() < 1e-9);
        assert!((first.discount_amount - 10.0).abs() < 1e-9);
        assert_eq!(first.order_month, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_load_orders_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_orders(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }));
        assert!(err.is_data_format());
    }

    // ── parse_orders: schema ──────────────────────────────────────────────────

    #[test]
    fn test_missing_required_column() {
        let err = parse(
            "order_date,registered_date,category,payment_method,after_discount,discount_amount\n\
             2024-01-05,2023-12-01,A,card,100,10\n",
        )
        .unwrap_err();
        match err {
            DashboardError::DataFormat { column, row, .. } => {
                assert_eq!(column, "customer_id");
                assert!(row.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_header_whitespace_is_trimmed_and_column_order_free() {
        let orders = parse(
            " discount_amount , after_discount ,customer_id,payment_method,category,registered_date,order_date\n\
             5,50,cust9,cod,Books,2023-01-01,2024-04-30\n",
        )
        .unwrap();
        let r = &orders.records()[0];
        assert_eq!(r.customer_id, "cust9");
        assert!((r.after_discount - 50.0).abs() < 1e-9);
        assert!((r.discount_amount - 5.0).abs() < 1e-9);
        assert_eq!(r.order_month, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn test_header_only_file_is_empty_set() {
        let orders = parse(&format!("{HEADER}\n")).unwrap();
        assert!(orders.is_empty());
    }

    // ── parse_orders: values ──────────────────────────────────────────────────

    #[test]
    fn test_unparsable_order_date_reports_row_and_column() {
        let err = parse(&format!(
            "{HEADER}\n1,2024-01-05,2023-12-01,A,card,c1,1,0\n2,someday,2023-12-01,A,card,c1,1,0\n"
        ))
        .unwrap_err();
        match err {
            DashboardError::DataFormat { row, column, reason, .. } => {
                assert_eq!(row, Some(2));
                assert_eq!(column, "order_date");
                assert!(reason.contains("someday"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_registered_date() {
        let err = parse(&format!("{HEADER}\n1,2024-01-05,,A,card,c1,1,0\n")).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::DataFormat { ref column, .. } if column == "registered_date"
        ));
    }

    #[test]
    fn test_unparsable_amount() {
        let err = parse(&format!("{HEADER}\n1,2024-01-05,2023-12-01,A,card,c1,lots,0\n")).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::DataFormat { ref column, .. } if column == "after_discount"
        ));
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        let err = parse(&format!("{HEADER}\n1,2024-01-05,2023-12-01,A,card,c1,NaN,0\n")).unwrap_err();
        assert!(err.is_data_format());
    }

    #[test]
    fn test_datetime_values_keep_time_and_bucket_by_month() {
        let orders = parse(&format!(
            "{HEADER}\n1,2022-07-31 23:59:59,2022-01-01 08:00:00,A,card,c1,12.5,2.5\n"
        ))
        .unwrap();
        let r = &orders.records()[0];
        assert_eq!(r.order_day(), NaiveDate::from_ymd_opt(2022, 7, 31).unwrap());
        assert_eq!(r.order_month, NaiveDate::from_ymd_opt(2022, 7, 1).unwrap());
    }

    #[test]
    fn test_ragged_row_is_malformed_csv() {
        let err = parse(&format!("{HEADER}\n1,2024-01-05,2023-12-01\n")).unwrap_err();
        assert!(matches!(err, DashboardError::Csv(_)));
        assert!(err.is_data_format());
    }
}
