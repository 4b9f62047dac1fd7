//! Interactive filter state for one dashboard session.
//!
//! [`DashboardSession`] owns the shared dataset, the current
//! [`FilterSelection`], and the snapshot computed from it. Every mutation
//! recomputes the snapshot synchronously, so readers always see results that
//! match the selection.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use dashboard_core::models::{FilterSelection, OrderSet};
use dashboard_core::time_utils::shift_months;
use dashboard_data::analysis::{build_snapshot, DashboardSnapshot};

// ── DateBound ─────────────────────────────────────────────────────────────────

/// Which end of the date range an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Start,
    End,
}

// ── DashboardSession ──────────────────────────────────────────────────────────

pub struct DashboardSession {
    orders: Arc<OrderSet>,
    /// Full-range selection the reset key returns to.
    defaults: FilterSelection,
    selection: FilterSelection,
    /// Multi-select options, in order of first appearance in the data.
    category_options: Vec<String>,
    payment_options: Vec<String>,
    snapshot: DashboardSnapshot,
}

impl DashboardSession {
    /// Start a session on `orders` with `selection` as the initial filter.
    pub fn new(orders: Arc<OrderSet>, selection: FilterSelection) -> Self {
        let defaults = FilterSelection::for_orders(&orders);
        let category_options = orders.categories();
        let payment_options = orders.payment_methods();
        let snapshot = build_snapshot(&orders, &selection);

        Self {
            orders,
            defaults,
            selection,
            category_options,
            payment_options,
            snapshot,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn category_options(&self) -> &[String] {
        &self.category_options
    }

    pub fn payment_options(&self) -> &[String] {
        &self.payment_options
    }

    /// Dataset date range, used as the default selection bounds.
    pub fn date_bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.defaults.start_date, self.defaults.end_date)
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    /// Replace the whole selection.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.recompute();
    }

    /// Back to the full date range with no categorical restriction.
    pub fn reset(&mut self) {
        self.set_selection(self.defaults.clone());
    }

    /// Move one end of the date range by `days`. Out-of-range dates are ignored.
    pub fn shift_days(&mut self, bound: DateBound, days: i64) {
        let current = self.bound(bound);
        if let Some(next) = current.checked_add_signed(Duration::days(days)) {
            self.set_bound(bound, next);
        }
    }

    /// Move one end of the date range by whole months.
    pub fn shift_months(&mut self, bound: DateBound, months: i32) {
        let next = shift_months(self.bound(bound), months);
        self.set_bound(bound, next);
    }

    /// Add or remove a category from the selection.
    pub fn toggle_category(&mut self, name: &str) {
        FilterSelection::toggle(&mut self.selection.categories, name);
        self.recompute();
    }

    /// Add or remove a payment method from the selection.
    pub fn toggle_payment_method(&mut self, name: &str) {
        FilterSelection::toggle(&mut self.selection.payment_methods, name);
        self.recompute();
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn bound(&self, bound: DateBound) -> NaiveDate {
        match bound {
            DateBound::Start => self.selection.start_date,
            DateBound::End => self.selection.end_date,
        }
    }

    fn set_bound(&mut self, bound: DateBound, date: NaiveDate) {
        match bound {
            DateBound::Start => self.selection.start_date = date,
            DateBound::End => self.selection.end_date = date,
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.snapshot = build_snapshot(&self.orders, &self.selection);
        tracing::debug!(
            start = %self.selection.start_date,
            end = %self.selection.end_date,
            categories = self.selection.categories.len(),
            payment_methods = self.selection.payment_methods.len(),
            matched = self.snapshot.metadata.orders_matched,
            "selection changed"
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
