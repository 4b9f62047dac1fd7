//! Chart panels for the dashboard.
//!
//! Each `render_*` function draws one bordered panel and falls back to
//! [`render_no_data`] when its table is empty.

use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Sparkline},
    Frame,
};

use dashboard_core::formatting::{format_compact, format_count, NO_DATA};
use dashboard_core::time_utils::short_month_label;
use dashboard_data::aggregator::{MonthlyActiveCustomers, MonthlyDiscountImpact, MonthlyRevenue, Share};

use crate::components::bars::{ShareBar, ValueBar};
use crate::themes::Theme;

pub const REVENUE_TITLE: &str = "Monthly Revenue Trend";
pub const DISCOUNT_TITLE: &str = "Discount (bar) vs Revenue (line)";
pub const CATEGORY_TITLE: &str = "Revenue by Category";
pub const PAYMENT_TITLE: &str = "Revenue Share by Payment Method";
pub const CUSTOMERS_TITLE: &str = "Active Customers per Month";

// ── Helpers ───────────────────────────────────────────────────────────────────

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {title} "), theme.panel_title))
}

/// First, middle and last month labels for an x axis over `months`.
fn month_labels(months: &[NaiveDate]) -> Vec<String> {
    match months {
        [] => Vec::new(),
        [only] => vec![short_month_label(*only)],
        [first, .., last] if months.len() == 2 => {
            vec![short_month_label(*first), short_month_label(*last)]
        }
        [first, .., last] => vec![
            short_month_label(*first),
            short_month_label(months[months.len() / 2]),
            short_month_label(*last),
        ],
    }
}

fn x_axis<'a>(months: &[NaiveDate], theme: &Theme) -> Axis<'a> {
    let upper = months.len().saturating_sub(1).max(1) as f64;
    Axis::default()
        .style(theme.axis)
        .bounds([0.0, upper])
        .labels(month_labels(months))
}

/// Y axis from zero to a little above `max`, labelled at 0, half and top.
fn y_axis<'a>(max: f64, theme: &Theme) -> Axis<'a> {
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };
    Axis::default()
        .style(theme.axis)
        .bounds([0.0, top])
        .labels(vec![
            format_compact(0.0),
            format_compact(top / 2.0),
            format_compact(top),
        ])
}

fn points<T>(rows: &[T], value: impl Fn(&T) -> f64) -> Vec<(f64, f64)> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| (i as f64, value(row)))
        .collect()
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}

// ── Panels ────────────────────────────────────────────────────────────────────

/// Placeholder panel shown when a chart has nothing to plot.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let message = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(NO_DATA, theme.dim)),
        Line::from(Span::styled("Widen the date range or clear filters", theme.dim)),
    ])
    .alignment(Alignment::Center)
    .block(panel(title, theme));
    frame.render_widget(message, area);
}

/// Line chart of net sales per month.
pub fn render_revenue_trend(frame: &mut Frame, area: Rect, rows: &[MonthlyRevenue], theme: &Theme) {
    if rows.is_empty() {
        render_no_data(frame, area, REVENUE_TITLE, theme);
        return;
    }

    let months: Vec<NaiveDate> = rows.iter().map(|r| r.month).collect();
    let data = points(rows, |r| r.revenue);
    let max = max_of(rows.iter().map(|r| r.revenue));

    let dataset = Dataset::default()
        .name("Revenue")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.revenue)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(panel(REVENUE_TITLE, theme))
        .x_axis(x_axis(&months, theme))
        .y_axis(y_axis(max, theme));
    frame.render_widget(chart, area);
}

/// Discount bars and a revenue line over the same months.
pub fn render_discount_impact(
    frame: &mut Frame,
    area: Rect,
    rows: &[MonthlyDiscountImpact],
    theme: &Theme,
) {
    if rows.is_empty() {
        render_no_data(frame, area, DISCOUNT_TITLE, theme);
        return;
    }

    let months: Vec<NaiveDate> = rows.iter().map(|r| r.month).collect();
    let discount = points(rows, |r| r.discount);
    let revenue = points(rows, |r| r.revenue);
    let max = max_of(rows.iter().flat_map(|r| [r.discount, r.revenue]));

    let datasets = vec![
        Dataset::default()
            .name("Discount")
            .marker(symbols::Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(theme.discount)
            .data(&discount),
        Dataset::default()
            .name("Revenue")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.revenue)
            .data(&revenue),
    ];

    let chart = Chart::new(datasets)
        .block(panel(DISCOUNT_TITLE, theme))
        .x_axis(x_axis(&months, theme))
        .y_axis(y_axis(max, theme));
    frame.render_widget(chart, area);
}

/// Horizontal bars of net sales per category, largest first.
pub fn render_category_distribution(frame: &mut Frame, area: Rect, rows: &[Share], theme: &Theme) {
    if rows.is_empty() {
        render_no_data(frame, area, CATEGORY_TITLE, theme);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let label_width = (inner_width / 4).clamp(6, 20);
    // label + space + bar + " 1,234,567"
    let bar_width = inner_width.saturating_sub(label_width + 1 + 12).max(1);
    let max = max_of(rows.iter().map(|s| s.revenue));

    let lines: Vec<Line> = rows
        .iter()
        .map(|share| {
            ValueBar::new(&share.name, share.revenue, max, theme)
                .with_widths(label_width, bar_width)
                .to_line()
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(panel(CATEGORY_TITLE, theme)), area);
}

/// Proportional share bar with a percentage legend per payment method.
pub fn render_payment_share(frame: &mut Frame, area: Rect, rows: &[Share], theme: &Theme) {
    if rows.is_empty() || rows.iter().all(|s| s.revenue == 0.0) {
        render_no_data(frame, area, PAYMENT_TITLE, theme);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let bar = ShareBar::new(rows, theme).with_width(width);

    let mut lines = vec![bar.to_line(), Line::from("")];
    lines.extend(bar.legend());

    frame.render_widget(Paragraph::new(lines).block(panel(PAYMENT_TITLE, theme)), area);
}

/// Filled sparkline of distinct customers per month.
pub fn render_active_customers(
    frame: &mut Frame,
    area: Rect,
    rows: &[MonthlyActiveCustomers],
    theme: &Theme,
) {
    if rows.is_empty() {
        render_no_data(frame, area, CUSTOMERS_TITLE, theme);
        return;
    }

    let values: Vec<u64> = rows.iter().map(|r| r.customers as u64).collect();
    let peak = values.iter().copied().max().unwrap_or(0);
    let first = rows.first().map(|r| short_month_label(r.month)).unwrap_or_default();
    let last = rows.last().map(|r| short_month_label(r.month)).unwrap_or_default();

    let title = Line::from(vec![
        Span::styled(format!(" {CUSTOMERS_TITLE} "), theme.panel_title),
        Span::styled(format!("peak {} · {first} – {last} ", format_count(peak as usize)), theme.dim),
    ]);

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(title),
        )
        .style(theme.customers)
        .max(peak.max(1))
        .data(values.iter().copied());
    frame.render_widget(sparkline, area);
}

/// Apply `style` to an area-wide message. Used by the dashboard for
/// terminals too small to lay out.
pub fn render_message(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    frame.render_widget(
        Paragraph::new(Span::styled(message.to_string(), style)).alignment(Alignment::Center),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
