use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::time_utils::month_start;

/// A single transaction line read from the sales dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// When the order was placed.
    pub order_date: NaiveDateTime,
    /// When the customer registered.
    pub registered_date: NaiveDateTime,
    /// Product category.
    pub category: String,
    /// Payment method used for the order.
    pub payment_method: String,
    /// Stable customer identifier.
    pub customer_id: String,
    /// Net sale amount after discount.
    pub after_discount: f64,
    /// Discount granted on the order.
    pub discount_amount: f64,
    /// First day of the month of `order_date`.
    pub order_month: NaiveDate,
}

impl OrderRecord {
    /// Build a record, deriving `order_month` from `order_date`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_date: NaiveDateTime,
        registered_date: NaiveDateTime,
        category: impl Into<String>,
        payment_method: impl Into<String>,
        customer_id: impl Into<String>,
        after_discount: f64,
        discount_amount: f64,
    ) -> Self {
        Self {
            order_date,
            registered_date,
            category: category.into(),
            payment_method: payment_method.into(),
            customer_id: customer_id.into(),
            after_discount,
            discount_amount,
            order_month: month_start(order_date),
        }
    }

    /// Calendar date the order was placed.
    pub fn order_day(&self) -> NaiveDate {
        self.order_date.date()
    }
}

// ── OrderSet ──────────────────────────────────────────────────────────────────

/// The full, immutable dataset produced by the loader.
///
/// Records can only be read through shared slices; nothing downstream can
/// reorder or modify them once loaded.
#[derive(Debug, Clone, Default)]
pub struct OrderSet {
    records: Vec<OrderRecord>,
}

impl OrderSet {
    /// Wrap loaded records.
    pub fn new(records: Vec<OrderRecord>) -> Self {
        Self { records }
    }

    /// All records in file order.
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest order date, or `None` for an empty set.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(OrderRecord::order_day).min()?;
        let max = self.records.iter().map(OrderRecord::order_day).max()?;
        Some((min, max))
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.category.as_str()))
    }

    /// Distinct payment methods in order of first appearance.
    pub fn payment_methods(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.payment_method.as_str()))
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

// ── FilterSelection ───────────────────────────────────────────────────────────

/// The user's current filter choice.
///
/// The date range is inclusive on both ends. An empty `categories` or
/// `payment_methods` set places no restriction on that column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub categories: BTreeSet<String>,
    pub payment_methods: BTreeSet<String>,
}

impl FilterSelection {
    /// Selection covering `start..=end` with no categorical restriction.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            categories: BTreeSet::new(),
            payment_methods: BTreeSet::new(),
        }
    }

    /// The default selection for `orders`: its full date range, everything
    /// else unrestricted.
    ///
    /// An empty dataset has no bounds; today's date is used for both ends so
    /// the selection is still well-formed.
    pub fn for_orders(orders: &OrderSet) -> Self {
        let (start, end) = orders.date_bounds().unwrap_or_else(|| {
            let today = chrono::Local::now().date_naive();
            (today, today)
        });
        Self::new(start, end)
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_payment_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payment_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// `true` when the date range cannot match any day.
    pub fn is_inverted(&self) -> bool {
        self.start_date > self.end_date
    }

    /// Add `value` to `set` if absent, remove it otherwise.
    pub fn toggle(set: &mut BTreeSet<String>, value: &str) {
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
