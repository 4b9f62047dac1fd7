use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 are considered light. If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Number of distinct colours used for share segments before they repeat.
pub const SHARE_PALETTE_LEN: usize = 6;

/// Complete theme definition carrying all styles used by the dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,

    // ── Panels ───────────────────────────────────────────────────────────────
    pub border: Style,
    /// Border of the filter field that has keyboard focus.
    pub border_focused: Style,
    pub panel_title: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub axis: Style,
    pub revenue: Style,
    pub discount: Style,
    pub customers: Style,
    pub bar_fill: Style,
    pub bar_empty: Style,
    /// Segment colours for the payment share bar.
    pub share_palette: [Color; SHARE_PALETTE_LEN],

    // ── Filter panel ─────────────────────────────────────────────────────────
    pub cursor: Style,
    pub checked: Style,
    pub unchecked: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),

            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            panel_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            axis: Style::default().fg(Color::Gray),
            revenue: Style::default().fg(Color::Cyan),
            discount: Style::default().fg(Color::Magenta),
            customers: Style::default().fg(Color::Green),
            bar_fill: Style::default().fg(Color::Blue),
            bar_empty: Style::default().fg(Color::DarkGray),
            share_palette: [
                Color::Cyan,
                Color::Magenta,
                Color::Yellow,
                Color::Green,
                Color::Blue,
                Color::Red,
            ],

            cursor: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan),
            checked: Style::default().fg(Color::Green),
            unchecked: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and strong accents so that content remains
    /// legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Yellow),

            border: Style::default().fg(Color::Gray),
            border_focused: Style::default().fg(Color::Blue),
            panel_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            axis: Style::default().fg(Color::DarkGray),
            revenue: Style::default().fg(Color::Blue),
            discount: Style::default().fg(Color::Magenta),
            customers: Style::default().fg(Color::Green),
            bar_fill: Style::default().fg(Color::Blue),
            bar_empty: Style::default().fg(Color::Gray),
            share_palette: [
                Color::Blue,
                Color::Magenta,
                Color::Red,
                Color::Green,
                Color::Cyan,
                Color::DarkGray,
            ],

            cursor: Style::default()
                .fg(Color::White)
                .bg(Color::Blue),
            checked: Style::default().fg(Color::Green),
            unchecked: Style::default().fg(Color::DarkGray),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to maintain a retro aesthetic and maximise
    /// compatibility with minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),

            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::White),
            panel_title: Style::default().fg(Color::Cyan),

            axis: Style::default().fg(Color::White),
            revenue: Style::default().fg(Color::Cyan),
            discount: Style::default().fg(Color::Magenta),
            customers: Style::default().fg(Color::Green),
            bar_fill: Style::default().fg(Color::Cyan),
            bar_empty: Style::default().fg(Color::DarkGray),
            share_palette: [
                Color::Cyan,
                Color::Magenta,
                Color::Yellow,
                Color::Green,
                Color::Blue,
                Color::Red,
            ],

            cursor: Style::default()
                .fg(Color::Black)
                .bg(Color::White),
            checked: Style::default().fg(Color::Green),
            unchecked: Style::default().fg(Color::White),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Fill style for the `index`-th share segment; colours cycle.
    pub fn share_style(&self, index: usize) -> Style {
        Style::default().fg(self.share_palette[index % SHARE_PALETTE_LEN])
    }

    /// Border style for a panel, highlighted when it has focus.
    pub fn focus_border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Theme construction ───────────────────────────────────────────────────

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.revenue.fg, Some(Color::Cyan));
        assert_eq!(t.discount.fg, Some(Color::Magenta));
        assert_eq!(t.customers.fg, Some(Color::Green));
        assert_eq!(t.cursor.bg, Some(Color::Cyan));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.revenue.fg, Some(Color::Blue));
    }

    #[test]
    fn test_classic_theme_creation() {
        let t = Theme::classic();
        // Classic has no bold modifiers on primary text fields.
        assert!(!t.bold.add_modifier.contains(Modifier::BOLD));
        assert!(!t.panel_title.add_modifier.contains(Modifier::BOLD));
        assert_eq!(t.header.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        assert!(!Theme::from_name("classic")
            .header
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("does-not-exist");
        assert!(t.header.fg.is_some());
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    #[test]
    fn test_share_style_cycles() {
        let t = Theme::dark();
        assert_eq!(t.share_style(0).fg, Some(Color::Cyan));
        assert_eq!(t.share_style(1).fg, Some(Color::Magenta));
        assert_eq!(t.share_style(SHARE_PALETTE_LEN).fg, t.share_style(0).fg);
    }

    #[test]
    fn test_focus_border() {
        let t = Theme::dark();
        assert_eq!(t.focus_border(true).fg, Some(Color::Cyan));
        assert_eq!(t.focus_border(false).fg, Some(Color::DarkGray));
    }
}
