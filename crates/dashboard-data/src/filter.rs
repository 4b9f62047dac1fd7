//! Filter engine: narrows the order set to the current selection.

use dashboard_core::models::{FilterSelection, OrderRecord, OrderSet};

// ── OrderView ─────────────────────────────────────────────────────────────────

/// A borrowed subset of an [`OrderSet`], in source order.
#[derive(Debug, Clone, Default)]
pub struct OrderView<'a> {
    rows: Vec<&'a OrderRecord>,
}

impl<'a> OrderView<'a> {
    /// View over every record of `orders`.
    pub fn all(orders: &'a OrderSet) -> Self {
        Self {
            rows: orders.records().iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a OrderRecord> + '_ {
        self.rows.iter().copied()
    }
}

// ── Predicates ────────────────────────────────────────────────────────────────

/// `true` when `record` passes every predicate of `selection`.
///
/// The date check uses the calendar day of `order_date`, inclusive on both
/// ends. Empty category / payment sets do not restrict.
pub fn matches(record: &OrderRecord, selection: &FilterSelection) -> bool {
    let day = record.order_day();
    if day < selection.start_date || day > selection.end_date {
        return false;
    }
    if !selection.categories.is_empty() && !selection.categories.contains(&record.category) {
        return false;
    }
    if !selection.payment_methods.is_empty()
        && !selection.payment_methods.contains(&record.payment_method)
    {
        return false;
    }
    true
}

/// Apply `selection` to `orders`, returning the matching rows.
///
/// An inverted date range (`start_date > end_date`) yields an empty view.
pub fn apply<'a>(orders: &'a OrderSet, selection: &FilterSelection) -> OrderView<'a> {
    if selection.is_inverted() {
        return OrderView::default();
    }

    OrderView {
        rows: orders
            .records()
            .iter()
            .filter(|r| matches(r, selection))
            .collect(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
