use crate::themes::Theme;
use chrono::NaiveDate;
use ratatui::text::{Line, Span};

use dashboard_core::formatting::format_count;

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Application title shown in the header and the text report.
pub const TITLE: &str = "SALES & PROMOTION DASHBOARD";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations.
/// 2. A 60-column `=` separator.
/// 3. Selected range and match count in `[ start → end | N of M orders ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Orders that passed the current filter.
    pub matched: usize,
    /// Orders in the loaded dataset.
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        matched: usize,
        total: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            start_date,
            end_date,
            matched,
            total,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(format!(" {TITLE} "), self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(
                    format!("{} → {}", self.start_date, self.end_date),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} of {} orders", format_count(self.matched), format_count(self.total)),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
