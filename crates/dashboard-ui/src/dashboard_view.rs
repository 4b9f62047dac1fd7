//! Full-screen dashboard layout.
//!
//! Header on top, filter sidebar on the left, KPI tiles and the five chart
//! panels on the right, caption at the bottom.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dashboard_data::aggregator::Kpis;
use dashboard_runtime::session::DashboardSession;

use crate::charts;
use crate::components::header::Header;
use crate::components::kpi::KpiTile;
use crate::filter_panel::{render_filter_panel, FilterPanelState};
use crate::themes::Theme;

/// Caption shown along the bottom edge.
pub const FOOTER: &str =
    "© 2025 Sales & Promotion Analytics Dashboard · promotion effectiveness and customer behaviour";

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

const SIDEBAR_WIDTH: u16 = 34;

/// Row of four bordered KPI tiles.
pub fn render_kpis(frame: &mut Frame, area: Rect, kpis: &Kpis, theme: &Theme) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (tile, cell) in KpiTile::from_kpis(kpis, theme).iter().zip(cells.iter()) {
        let widget = Paragraph::new(tile.to_lines())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(theme.border));
        frame.render_widget(widget, *cell);
    }
}

/// Draw the whole dashboard for `session` into `frame`.
pub fn render_dashboard(
    frame: &mut Frame,
    session: &DashboardSession,
    panel: &FilterPanelState,
    theme: &Theme,
) {
    let area = frame.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        charts::render_message(
            frame,
            area,
            &format!("Terminal too small: need {MIN_WIDTH}x{MIN_HEIGHT} (press q to quit)"),
            theme.warning,
        );
        return;
    }

    let snapshot = session.snapshot();
    let selection = &snapshot.selection;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ────────────────────────────────────────────────────────────────
    let header = Header::new(
        selection.start_date,
        selection.end_date,
        snapshot.metadata.orders_matched,
        snapshot.metadata.orders_total,
        theme,
    );
    frame.render_widget(Paragraph::new(header.to_lines()), rows[0]);

    // ── Body ──────────────────────────────────────────────────────────────────
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(rows[1]);

    render_filter_panel(frame, body[0], session, panel, theme);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Percentage(38),
            Constraint::Percentage(34),
            Constraint::Min(5),
        ])
        .split(body[1]);

    render_kpis(frame, main[0], &snapshot.kpis, theme);

    let halves = |area: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area)
    };

    let top = halves(main[1]);
    charts::render_revenue_trend(frame, top[0], &snapshot.monthly_revenue, theme);
    charts::render_discount_impact(frame, top[1], &snapshot.discount_impact, theme);

    let middle = halves(main[2]);
    charts::render_category_distribution(frame, middle[0], &snapshot.category_distribution, theme);
    charts::render_payment_share(frame, middle[1], &snapshot.payment_distribution, theme);

    charts::render_active_customers(frame, main[3], &snapshot.active_customers, theme);

    // ── Footer ────────────────────────────────────────────────────────────────
    let footer = Paragraph::new(Line::from(Span::styled(FOOTER, theme.dim))).alignment(Alignment::Center);
    frame.render_widget(footer, rows[2]);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use dashboard_core::models::{FilterSelection, OrderRecord, OrderSet};
    use dashboard_core::time_utils::parse_datetime;
    use ratatui::{backend::TestBackend, Terminal};

    fn session() -> DashboardSession {
        let reg = parse_datetime("2023-06-01").unwrap();
        let row = |ts: &str, cat: &str, pay: &str, cust: &str, net: f64, disc: f64| {
            OrderRecord::new(parse_datetime(ts).unwrap(), reg, cat, pay, cust, net, disc)
        };
        let orders = Arc::new(OrderSet::new(vec![
            row("2024-01-05", "A", "card", "cust1", 100.0, 10.0),
            row("2024-01-20", "B", "cash", "cust2", 200.0, 0.0),
            row("2024-02-01", "A", "card", "cust1", 50.0, 5.0),
        ]));
        let selection = FilterSelection::for_orders(&orders);
        DashboardSession::new(orders, selection)
    }

    fn render(session: &DashboardSession, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let panel = FilterPanelState::default();
        terminal
            .draw(|frame| render_dashboard(frame, session, &panel, &theme))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_dashboard_shows_kpis() {
        let screen = render(&session(), 160, 48);
        assert!(screen.contains("SALES & PROMOTION DASHBOARD"));
        assert!(screen.contains("3 of 3 orders"));
        assert!(screen.contains("Total Revenue"));
        assert!(screen.contains("350"));
        assert!(screen.contains("117"));
    }

    #[test]
    fn test_render_dashboard_empty_selection() {
        let mut s = session();
        s.set_selection(FilterSelection::new(
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2030, 1, 31).unwrap(),
        ));
        let screen = render(&s, 160, 48);
        assert!(screen.contains("0 of 3 orders"));
        assert!(screen.contains("no data"));
    }

    #[test]
    fn test_render_dashboard_minimum_size_does_not_panic() {
        render(&session(), MIN_WIDTH, MIN_HEIGHT);
    }

    #[test]
    fn test_render_dashboard_too_small() {
        let screen = render(&session(), 40, 10);
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn test_render_kpis_does_not_panic() {
        let backend = TestBackend::new(100, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_kpis(frame, area, &Kpis::default(), &theme);
            })
            .unwrap();
    }
}
