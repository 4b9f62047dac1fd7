//! Sidebar holding the four filter controls.
//!
//! Focus moves between the date fields and the two multi-selects; the focused
//! control has a highlighted border and, for lists, a visible cursor row.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dashboard_runtime::session::DashboardSession;

use crate::components::bars::fit_width;
use crate::themes::Theme;

// ── FilterField ───────────────────────────────────────────────────────────────

/// The focusable controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    StartDate,
    EndDate,
    Categories,
    PaymentMethods,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::StartDate,
        FilterField::EndDate,
        FilterField::Categories,
        FilterField::PaymentMethods,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            FilterField::StartDate => "Start date",
            FilterField::EndDate => "End date",
            FilterField::Categories => "Product category",
            FilterField::PaymentMethods => "Payment method",
        }
    }
}

// ── FilterPanelState ──────────────────────────────────────────────────────────

/// Focus and list cursors. Selection contents live in the session.
#[derive(Debug, Clone)]
pub struct FilterPanelState {
    pub focus: FilterField,
    pub category_cursor: usize,
    pub payment_cursor: usize,
}

impl Default for FilterPanelState {
    fn default() -> Self {
        Self {
            focus: FilterField::StartDate,
            category_cursor: 0,
            payment_cursor: 0,
        }
    }
}

impl FilterPanelState {
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Move the cursor of the focused list by `delta`, clamped to `len`.
    /// Does nothing when a date field has focus.
    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        let cursor = match self.focus {
            FilterField::Categories => &mut self.category_cursor,
            FilterField::PaymentMethods => &mut self.payment_cursor,
            _ => return,
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Key hints shown under the controls.
pub const KEY_HELP: [&str; 5] = [
    "Tab/⇧Tab  focus",
    "←/→  ±1 day   PgUp/PgDn  ±1 month",
    "↑/↓  move   Space  toggle",
    "r  reset filters",
    "q  quit",
];

fn field_block<'a>(field: FilterField, focused: bool, theme: &Theme) -> Block<'a> {
    let title_style = if focused { theme.panel_title } else { theme.label };
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.focus_border(focused))
        .title(Span::styled(format!(" {} ", field.title()), title_style))
}

fn date_line<'a>(date: NaiveDate, in_range: bool, theme: &Theme) -> Line<'a> {
    let style = if in_range { theme.value } else { theme.warning };
    Line::from(vec![
        Span::styled("◀ ", theme.dim),
        Span::styled(date.format("%Y-%m-%d").to_string(), style),
        Span::styled(" ▶", theme.dim),
    ])
}

/// Lines for a multi-select list, scrolled so the cursor stays visible.
pub fn option_lines<'a>(
    options: &[String],
    selected: &BTreeSet<String>,
    cursor: Option<usize>,
    height: usize,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'a>> {
    if options.is_empty() {
        return vec![Line::from(Span::styled("(no values)", theme.dim))];
    }

    let height = height.max(1);
    let offset = match cursor {
        Some(c) if c >= height => c + 1 - height,
        _ => 0,
    };

    options
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(index, name)| {
            let checked = selected.contains(name);
            let mark = if checked { "[x] " } else { "[ ] " };
            let mark_style = if checked { theme.checked } else { theme.unchecked };
            let label = fit_width(name, width.saturating_sub(4));
            if cursor == Some(index) {
                Line::from(vec![
                    Span::styled(mark, theme.cursor),
                    Span::styled(label, theme.cursor),
                ])
            } else {
                Line::from(vec![
                    Span::styled(mark, mark_style),
                    Span::styled(label, theme.text),
                ])
            }
        })
        .collect()
}

/// Draw the filter sidebar for `session`.
pub fn render_filter_panel(
    frame: &mut Frame,
    area: Rect,
    session: &DashboardSession,
    state: &FilterPanelState,
    theme: &Theme,
) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(" Filters ", theme.panel_title));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Min(3),
            Constraint::Length(KEY_HELP.len() as u16 + 1),
        ])
        .split(inner);

    let selection = session.selection();
    let (min_date, max_date) = session.date_bounds();
    let in_range = |d: NaiveDate| d >= min_date && d <= max_date;

    // ── Dates ─────────────────────────────────────────────────────────────────
    for (field, date, chunk) in [
        (FilterField::StartDate, selection.start_date, chunks[0]),
        (FilterField::EndDate, selection.end_date, chunks[1]),
    ] {
        let widget = Paragraph::new(date_line(date, in_range(date), theme))
            .block(field_block(field, state.focus == field, theme));
        frame.render_widget(widget, chunk);
    }

    // ── Multi-selects ─────────────────────────────────────────────────────────
    for (field, options, selected, cursor, chunk) in [
        (
            FilterField::Categories,
            session.category_options(),
            &selection.categories,
            state.category_cursor,
            chunks[2],
        ),
        (
            FilterField::PaymentMethods,
            session.payment_options(),
            &selection.payment_methods,
            state.payment_cursor,
            chunks[3],
        ),
    ] {
        let focused = state.focus == field;
        let block = field_block(field, focused, theme);
        let list_area = block.inner(chunk);
        let lines = option_lines(
            options,
            selected,
            focused.then_some(cursor),
            list_area.height as usize,
            list_area.width as usize,
            theme,
        );
        frame.render_widget(Paragraph::new(lines).block(block), chunk);
    }

    // ── Help ──────────────────────────────────────────────────────────────────
    let mut help: Vec<Line> = vec![Line::from("")];
    if selection.is_inverted() {
        help[0] = Line::from(Span::styled("Start date is after end date", theme.warning));
    }
    help.extend(KEY_HELP.iter().map(|h| Line::from(Span::styled(*h, theme.dim))));
    frame.render_widget(Paragraph::new(help), chunks[4]);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use dashboard_core::models::{FilterSelection, OrderRecord, OrderSet};
    use dashboard_core::time_utils::parse_datetime;
    use ratatui::{backend::TestBackend, Terminal};

    fn session() -> DashboardSession {
        let reg = parse_datetime("2023-06-01").unwrap();
        let orders = Arc::new(OrderSet::new(vec![
            OrderRecord::new(parse_datetime("2024-01-05").unwrap(), reg, "A", "card", "c1", 100.0, 10.0),
            OrderRecord::new(parse_datetime("2024-01-20").unwrap(), reg, "B", "cash", "c2", 200.0, 0.0),
        ]));
        let selection = FilterSelection::for_orders(&orders);
        DashboardSession::new(orders, selection)
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    // ── FilterField ───────────────────────────────────────────────────────────

    #[test]
    fn test_focus_cycles_forward_and_back() {
        let mut field = FilterField::StartDate;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, FilterField::StartDate);
        assert_eq!(FilterField::StartDate.prev(), FilterField::PaymentMethods);
        assert_eq!(FilterField::Categories.next(), FilterField::PaymentMethods);
    }

    // ── FilterPanelState ──────────────────────────────────────────────────────

    #[test]
    fn test_move_cursor_clamps() {
        let mut state = FilterPanelState {
            focus: FilterField::Categories,
            ..Default::default()
        };
        state.move_cursor(-1, 3);
        assert_eq!(state.category_cursor, 0);
        state.move_cursor(5, 3);
        assert_eq!(state.category_cursor, 2);
        state.move_cursor(1, 0);
        assert_eq!(state.category_cursor, 0);
    }

    #[test]
    fn test_move_cursor_ignored_on_date_fields() {
        let mut state = FilterPanelState::default();
        state.move_cursor(1, 3);
        assert_eq!(state.category_cursor, 0);
        assert_eq!(state.payment_cursor, 0);
    }

    #[test]
    fn test_move_cursor_targets_focused_list() {
        let mut state = FilterPanelState {
            focus: FilterField::PaymentMethods,
            ..Default::default()
        };
        state.move_cursor(1, 2);
        assert_eq!(state.payment_cursor, 1);
        assert_eq!(state.category_cursor, 0);
    }

    // ── option_lines ──────────────────────────────────────────────────────────

    #[test]
    fn test_option_lines_marks_selected() {
        let theme = Theme::dark();
        let options = vec!["A".to_string(), "B".to_string()];
        let selected: BTreeSet<String> = ["B".to_string()].into_iter().collect();
        let lines = option_lines(&options, &selected, None, 5, 20, &theme);
        assert_eq!(lines.len(), 2);
        assert!(text(&lines[0]).starts_with("[ ] A"));
        assert!(text(&lines[1]).starts_with("[x] B"));
    }

    #[test]
    fn test_option_lines_scrolls_to_cursor() {
        let theme = Theme::dark();
        let options: Vec<String> = (0..10).map(|i| format!("opt{i}")).collect();
        let lines = option_lines(&options, &BTreeSet::new(), Some(7), 3, 20, &theme);
        assert_eq!(lines.len(), 3);
        assert!(text(&lines[2]).contains("opt7"));
        assert_eq!(lines[2].spans[0].style, theme.cursor);
    }

    #[test]
    fn test_option_lines_empty() {
        let theme = Theme::dark();
        let lines = option_lines(&[], &BTreeSet::new(), None, 3, 20, &theme);
        assert_eq!(text(&lines[0]), "(no values)");
    }

    // ── Render (does not panic) ───────────────────────────────────────────────

    #[test]
    fn test_render_filter_panel_does_not_panic() {
        let backend = TestBackend::new(40, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let session = session();
        let state = FilterPanelState {
            focus: FilterField::Categories,
            ..Default::default()
        };

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_filter_panel(frame, area, &session, &state, &theme);
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("2024-01-05"));
        assert!(screen.contains("2024-01-20"));
        assert!(screen.contains("Product category"));
    }

    #[test]
    fn test_render_filter_panel_small_area_does_not_panic() {
        let backend = TestBackend::new(20, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let session = session();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_filter_panel(frame, area, &session, &FilterPanelState::default(), &theme);
            })
            .unwrap();
    }
}
