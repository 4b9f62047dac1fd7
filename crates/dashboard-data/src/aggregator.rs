//! Sales aggregation over a filtered order view.
//!
//! Every reduction is order-insensitive: permuting the rows of the view never
//! changes a result. Month-keyed tables come back in ascending month order.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dashboard_core::models::OrderRecord;

use crate::filter::OrderView;

// ── Output types ──────────────────────────────────────────────────────────────

/// The four headline figures of a selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// Sum of net sales (`after_discount`).
    pub total_revenue: f64,
    /// Sum of `discount_amount`.
    pub total_discount: f64,
    /// Mean net sale per order; `None` when the view is empty.
    pub avg_order_value: Option<f64>,
    /// Distinct customers with at least one order.
    pub active_customers: usize,
    pub order_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: NaiveDate,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDiscountImpact {
    pub month: NaiveDate,
    pub discount: f64,
    pub revenue: f64,
}

/// Net sales attributed to one category or payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub name: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActiveCustomers {
    pub month: NaiveDate,
    pub customers: usize,
}

// ── Summation ─────────────────────────────────────────────────────────────────

/// Sum `values` smallest first, so the result depends only on the multiset of
/// values and never on row order.
fn ordered_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

// ── MonthTotals ───────────────────────────────────────────────────────────────

/// Collected amounts for one calendar month.
#[derive(Debug, Default)]
struct MonthTotals<'a> {
    revenue: Vec<f64>,
    discount: Vec<f64>,
    customers: HashSet<&'a str>,
}

impl<'a> MonthTotals<'a> {
    fn add_order(&mut self, order: &'a OrderRecord) {
        self.revenue.push(order.after_discount);
        self.discount.push(order.discount_amount);
        self.customers.insert(order.customer_id.as_str());
    }
}

/// Group `view` by `order_month`. The BTreeMap keeps months sorted.
fn by_month<'a>(view: &OrderView<'a>) -> BTreeMap<NaiveDate, MonthTotals<'a>> {
    let mut months: BTreeMap<NaiveDate, MonthTotals<'a>> = BTreeMap::new();
    for order in view.iter() {
        months.entry(order.order_month).or_default().add_order(order);
    }
    months
}

/// Sum `after_discount` per key.
fn revenue_by<'a>(
    view: &OrderView<'a>,
    key: impl Fn(&'a OrderRecord) -> &'a str,
) -> HashMap<&'a str, f64> {
    let mut amounts: HashMap<&'a str, Vec<f64>> = HashMap::new();
    for order in view.iter() {
        amounts.entry(key(order)).or_default().push(order.after_discount);
    }
    amounts
        .into_iter()
        .map(|(name, values)| (name, ordered_sum(values)))
        .collect()
}

// ── Reductions ────────────────────────────────────────────────────────────────

/// Headline KPIs for `view`.
pub fn kpis(view: &OrderView<'_>) -> Kpis {
    let mut revenue = Vec::with_capacity(view.len());
    let mut discount = Vec::with_capacity(view.len());
    let mut customers: HashSet<&str> = HashSet::new();

    for order in view.iter() {
        revenue.push(order.after_discount);
        discount.push(order.discount_amount);
        customers.insert(order.customer_id.as_str());
    }

    let total_revenue = ordered_sum(revenue);
    let total_discount = ordered_sum(discount);

    let order_count = view.len();
    let avg_order_value = if order_count == 0 {
        None
    } else {
        Some(total_revenue / order_count as f64)
    };

    Kpis {
        total_revenue,
        total_discount,
        avg_order_value,
        active_customers: customers.len(),
        order_count,
    }
}

/// Net sales per month, ascending.
pub fn monthly_revenue(view: &OrderView<'_>) -> Vec<MonthlyRevenue> {
    by_month(view)
        .into_iter()
        .map(|(month, totals)| MonthlyRevenue {
            month,
            revenue: ordered_sum(totals.revenue),
        })
        .collect()
}

/// Discount granted and net sales per month, ascending.
pub fn monthly_discount_impact(view: &OrderView<'_>) -> Vec<MonthlyDiscountImpact> {
    by_month(view)
        .into_iter()
        .map(|(month, totals)| MonthlyDiscountImpact {
            month,
            discount: ordered_sum(totals.discount),
            revenue: ordered_sum(totals.revenue),
        })
        .collect()
}

/// Net sales per category, largest first. Equal values sort by name.
pub fn category_distribution(view: &OrderView<'_>) -> Vec<Share> {
    let mut shares: Vec<Share> = revenue_by(view, |o| o.category.as_str())
        .into_iter()
        .map(|(name, revenue)| Share {
            name: name.to_string(),
            revenue,
        })
        .collect();

    shares.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.name.cmp(&b.name))
    });
    shares
}

/// Net sales per payment method, by name.
pub fn payment_distribution(view: &OrderView<'_>) -> Vec<Share> {
    let mut shares: Vec<Share> = revenue_by(view, |o| o.payment_method.as_str())
        .into_iter()
        .map(|(name, revenue)| Share {
            name: name.to_string(),
            revenue,
        })
        .collect();

    shares.sort_by(|a, b| a.name.cmp(&b.name));
    shares
}

/// Distinct customers per month, ascending.
pub fn monthly_active_customers(view: &OrderView<'_>) -> Vec<MonthlyActiveCustomers> {
    by_month(view)
        .into_iter()
        .map(|(month, totals)| MonthlyActiveCustomers {
            month,
            customers: totals.customers.len(),
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
