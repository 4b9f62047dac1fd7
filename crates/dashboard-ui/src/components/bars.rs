use crate::themes::Theme;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use dashboard_core::formatting::{format_number, percentage};
use dashboard_data::aggregator::Share;

const FILLED_CHAR: char = '\u{2588}'; // █  FULL BLOCK
const EMPTY_CHAR: char = '\u{2591}'; // ░  LIGHT SHADE

/// Cut `text` to at most `width` display columns, then pad it to exactly
/// `width`. Truncated text ends in `…`.
pub fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

// ── ValueBar ─────────────────────────────────────────────────────────────────

/// One row of a horizontal bar chart: label, bar scaled to `max`, value.
pub struct ValueBar<'a> {
    pub label: &'a str,
    pub value: f64,
    /// Value that fills the whole bar.
    pub max: f64,
    pub label_width: usize,
    pub bar_width: usize,
    pub theme: &'a Theme,
}

impl<'a> ValueBar<'a> {
    pub fn new(label: &'a str, value: f64, max: f64, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            max,
            label_width: 16,
            bar_width: 30,
            theme,
        }
    }

    pub fn with_widths(mut self, label_width: usize, bar_width: usize) -> Self {
        self.label_width = label_width;
        self.bar_width = bar_width;
        self
    }

    pub fn to_line(&self) -> Line<'a> {
        let ratio = if self.max > 0.0 {
            (self.value / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = (ratio * self.bar_width as f64).round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        let filled_str: String = std::iter::repeat(FILLED_CHAR).take(filled).collect();
        let empty_str: String = std::iter::repeat(EMPTY_CHAR).take(empty).collect();

        Line::from(vec![
            Span::styled(fit_width(self.label, self.label_width), self.theme.label),
            Span::raw(" "),
            Span::styled(filled_str, self.theme.bar_fill),
            Span::styled(empty_str, self.theme.bar_empty),
            Span::styled(format!(" {}", format_number(self.value, 0)), self.theme.value),
        ])
    }
}

// ── ShareBar ─────────────────────────────────────────────────────────────────

/// A proportional multi-coloured bar showing each entry's share of the total,
/// followed by a legend line per entry with its percentage.
pub struct ShareBar<'a> {
    pub shares: &'a [Share],
    pub width: usize,
    pub theme: &'a Theme,
}

impl<'a> ShareBar<'a> {
    pub fn new(shares: &'a [Share], theme: &'a Theme) -> Self {
        Self {
            shares,
            width: 50,
            theme,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    fn total(&self) -> f64 {
        self.shares.iter().map(|s| s.revenue).sum()
    }

    /// Each share as `(name, percent of total)`, one decimal.
    pub fn percentages(&self) -> Vec<(&'a str, f64)> {
        let total = self.total();
        self.shares
            .iter()
            .map(|s| (s.name.as_str(), percentage(s.revenue, total, 1)))
            .collect()
    }

    /// The segmented bar.
    pub fn to_line(&self) -> Line<'a> {
        let mut spans: Vec<Span<'a>> = Vec::new();
        for (index, (_, pct)) in self.percentages().into_iter().enumerate() {
            let chars = ((pct / 100.0) * self.width as f64).round() as usize;
            if chars > 0 {
                spans.push(Span::styled(
                    FILLED_CHAR.to_string().repeat(chars),
                    self.theme.share_style(index),
                ));
            }
        }
        Line::from(spans)
    }

    /// One legend line per share: colour swatch, name, percentage, amount.
    pub fn legend(&self) -> Vec<Line<'a>> {
        self.percentages()
            .into_iter()
            .zip(self.shares.iter())
            .enumerate()
            .map(|(index, ((name, pct), share))| {
                Line::from(vec![
                    Span::styled(format!("{FILLED_CHAR}{FILLED_CHAR} "), self.theme.share_style(index)),
                    Span::styled(name.to_string(), self.theme.text),
                    Span::styled(format!(" {pct:.1}%"), self.theme.value),
                    Span::styled(format!(" ({})", format_number(share.revenue, 0)), self.theme.dim),
                ])
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
