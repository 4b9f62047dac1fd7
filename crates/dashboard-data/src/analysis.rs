//! Per-cycle dashboard computation.
//!
//! Runs the filter over the loaded orders and every reduction over the
//! resulting view, returning a [`DashboardSnapshot`] ready for the UI layer
//! or the report writers.

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use dashboard_core::models::{FilterSelection, OrderSet};

use crate::aggregator::{
    self, Kpis, MonthlyActiveCustomers, MonthlyDiscountImpact, MonthlyRevenue, Share,
};
use crate::filter;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// ISO-8601 timestamp when this snapshot was generated.
    pub generated_at: String,
    /// Rows in the loaded dataset.
    pub orders_total: usize,
    /// Rows that passed the filter.
    pub orders_matched: usize,
    /// Wall-clock milliseconds spent filtering and aggregating.
    pub compute_time_ms: f64,
}

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub selection: FilterSelection,
    pub metadata: SnapshotMetadata,
    pub kpis: Kpis,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub discount_impact: Vec<MonthlyDiscountImpact>,
    pub category_distribution: Vec<Share>,
    pub payment_distribution: Vec<Share>,
    pub active_customers: Vec<MonthlyActiveCustomers>,
}

impl DashboardSnapshot {
    /// `true` when no order matched the selection.
    pub fn is_empty(&self) -> bool {
        self.metadata.orders_matched == 0
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Filter `orders` by `selection` and compute every dashboard table.
pub fn build_snapshot(orders: &OrderSet, selection: &FilterSelection) -> DashboardSnapshot {
    let started = Instant::now();

    let view = filter::apply(orders, selection);
    if selection.is_inverted() {
        debug!(
            "Start date {} is after end date {}; selection is empty",
            selection.start_date, selection.end_date
        );
    }

    let kpis = aggregator::kpis(&view);
    let monthly_revenue = aggregator::monthly_revenue(&view);
    let discount_impact = aggregator::monthly_discount_impact(&view);
    let category_distribution = aggregator::category_distribution(&view);
    let payment_distribution = aggregator::payment_distribution(&view);
    let active_customers = aggregator::monthly_active_customers(&view);

    let compute_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "Snapshot: {} of {} orders matched, {} months, {:.2} ms",
        view.len(),
        orders.len(),
        monthly_revenue.len(),
        compute_time_ms
    );

    DashboardSnapshot {
        selection: selection.clone(),
        metadata: SnapshotMetadata {
            generated_at: Utc::now().to_rfc3339(),
            orders_total: orders.len(),
            orders_matched: view.len(),
            compute_time_ms,
        },
        kpis,
        monthly_revenue,
        discount_impact,
        category_distribution,
        payment_distribution,
        active_customers,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
