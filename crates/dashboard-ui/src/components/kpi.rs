use crate::themes::Theme;
use ratatui::text::{Line, Span};

use dashboard_core::formatting::{format_amount, format_count};
use dashboard_data::aggregator::Kpis;

/// One headline metric: a caption above a large value.
pub struct KpiTile<'a> {
    pub title: &'static str,
    pub value: String,
    pub theme: &'a Theme,
}

impl<'a> KpiTile<'a> {
    pub fn new(title: &'static str, value: String, theme: &'a Theme) -> Self {
        Self { title, value, theme }
    }

    /// The four dashboard tiles, in display order.
    ///
    /// Amounts are thousand-grouped integers; an undefined average renders
    /// as "no data".
    pub fn from_kpis(kpis: &Kpis, theme: &'a Theme) -> [KpiTile<'a>; 4] {
        [
            Self::new("Total Revenue", format_amount(Some(kpis.total_revenue)), theme),
            Self::new("Total Discount", format_amount(Some(kpis.total_discount)), theme),
            Self::new("Average Order Value", format_amount(kpis.avg_order_value), theme),
            Self::new("Active Customers", format_count(kpis.active_customers), theme),
        ]
    }

    /// Caption line followed by the value line.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(self.title, self.theme.label)),
            Line::from(Span::styled(self.value.clone(), self.theme.value)),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tiles: &[KpiTile]) -> Vec<String> {
        tiles.iter().map(|t| t.value.clone()).collect()
    }

    #[test]
    fn test_tiles_from_kpis() {
        let theme = Theme::dark();
        let kpis = Kpis {
            total_revenue: 1_234_567.4,
            total_discount: 15.0,
            avg_order_value: Some(116.666),
            active_customers: 2_500,
            order_count: 3,
        };
        let tiles = KpiTile::from_kpis(&kpis, &theme);
        assert_eq!(values(&tiles), vec!["1,234,567", "15", "117", "2,500"]);
        assert_eq!(tiles[2].title, "Average Order Value");
    }

    #[test]
    fn test_tiles_for_empty_selection() {
        let theme = Theme::dark();
        let tiles = KpiTile::from_kpis(&Kpis::default(), &theme);
        assert_eq!(values(&tiles), vec!["0", "0", "no data", "0"]);
    }

    #[test]
    fn test_tile_lines() {
        let theme = Theme::dark();
        let tile = KpiTile::new("Total Revenue", "350".to_string(), &theme);
        let lines = tile.to_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "Total Revenue");
        assert_eq!(lines[1].spans[0].content, "350");
    }
}
