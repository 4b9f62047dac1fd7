//! Non-interactive output: a plain-text report and a JSON dump of the
//! snapshot.

use std::fmt::Write as _;

use dashboard_core::error::Result;
use dashboard_core::formatting::{format_amount, format_count, format_number, percentage, NO_DATA};
use dashboard_core::time_utils::format_month;
use dashboard_data::analysis::DashboardSnapshot;

use crate::components::header::TITLE;
use crate::dashboard_view::FOOTER;

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
}

fn join_or_all(values: &std::collections::BTreeSet<String>) -> String {
    if values.is_empty() {
        "all".to_string()
    } else {
        values.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Render the snapshot as a plain-text report with the same content as the
/// interactive dashboard.
pub fn render_report(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    let selection = &snapshot.selection;
    let kpis = &snapshot.kpis;

    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(
        out,
        "Period:          {} → {}",
        selection.start_date, selection.end_date
    );
    let _ = writeln!(out, "Categories:      {}", join_or_all(&selection.categories));
    let _ = writeln!(out, "Payment methods: {}", join_or_all(&selection.payment_methods));
    let _ = writeln!(
        out,
        "Orders:          {} of {}",
        format_count(snapshot.metadata.orders_matched),
        format_count(snapshot.metadata.orders_total)
    );

    section(&mut out, "Key figures");
    let _ = writeln!(out, "{:<22}{:>16}", "Total Revenue", format_amount(Some(kpis.total_revenue)));
    let _ = writeln!(out, "{:<22}{:>16}", "Total Discount", format_amount(Some(kpis.total_discount)));
    let _ = writeln!(out, "{:<22}{:>16}", "Average Order Value", format_amount(kpis.avg_order_value));
    let _ = writeln!(out, "{:<22}{:>16}", "Active Customers", format_count(kpis.active_customers));

    section(&mut out, "Monthly revenue");
    if snapshot.monthly_revenue.is_empty() {
        let _ = writeln!(out, "{NO_DATA}");
    }
    for row in &snapshot.monthly_revenue {
        let _ = writeln!(out, "{:<10}{:>16}", format_month(row.month), format_number(row.revenue, 0));
    }

    section(&mut out, "Discount vs revenue");
    if snapshot.discount_impact.is_empty() {
        let _ = writeln!(out, "{NO_DATA}");
    } else {
        let _ = writeln!(out, "{:<10}{:>16}{:>16}", "Month", "Discount", "Revenue");
    }
    for row in &snapshot.discount_impact {
        let _ = writeln!(
            out,
            "{:<10}{:>16}{:>16}",
            format_month(row.month),
            format_number(row.discount, 0),
            format_number(row.revenue, 0)
        );
    }

    section(&mut out, "Revenue by category");
    if snapshot.category_distribution.is_empty() {
        let _ = writeln!(out, "{NO_DATA}");
    }
    for share in &snapshot.category_distribution {
        let _ = writeln!(out, "{:<24}{:>16}", share.name, format_number(share.revenue, 0));
    }

    section(&mut out, "Revenue share by payment method");
    if snapshot.payment_distribution.is_empty() {
        let _ = writeln!(out, "{NO_DATA}");
    }
    let payment_total: f64 = snapshot.payment_distribution.iter().map(|s| s.revenue).sum();
    for share in &snapshot.payment_distribution {
        let _ = writeln!(
            out,
            "{:<24}{:>16}{:>8.1}%",
            share.name,
            format_number(share.revenue, 0),
            percentage(share.revenue, payment_total, 1)
        );
    }

    section(&mut out, "Active customers per month");
    if snapshot.active_customers.is_empty() {
        let _ = writeln!(out, "{NO_DATA}");
    }
    for row in &snapshot.active_customers {
        let _ = writeln!(out, "{:<10}{:>16}", format_month(row.month), format_count(row.customers));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{FOOTER}");
    out
}

/// Pretty-printed JSON of the whole snapshot. An undefined average is `null`.
pub fn render_json(snapshot: &DashboardSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
