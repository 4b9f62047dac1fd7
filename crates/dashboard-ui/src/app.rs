//! Main application state and TUI event loop for the sales dashboard.
//!
//! [`App`] owns the theme, the filter panel state and the
//! [`DashboardSession`]. Each key press that edits the selection triggers a
//! synchronous recomputation inside the session before the next draw.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use dashboard_core::error::{DashboardError, Result};
use dashboard_runtime::session::{DashboardSession, DateBound};

use crate::dashboard_view::render_dashboard;
use crate::filter_panel::{FilterField, FilterPanelState};
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Dataset, selection and current snapshot.
    pub session: DashboardSession,
    /// Focus and list cursors of the filter sidebar.
    pub panel: FilterPanelState,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application around `session`.
    pub fn new(session: DashboardSession, theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            session,
            panel: FilterPanelState::default(),
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until `q`, `Q`, or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// on the current thread. The terminal is restored even when drawing or
    /// reading input fails; any I/O failure surfaces as
    /// [`DashboardError::Terminal`].
    pub async fn run(mut self) -> Result<()> {
        enable_raw_mode().map_err(DashboardError::terminal)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(DashboardError::terminal)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(DashboardError::terminal)?;

        let result = self.event_loop(&mut terminal);
        let restored = restore_terminal(&mut terminal);

        result.and(restored).map_err(DashboardError::terminal)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            terminal.draw(|frame| render_dashboard(frame, &self.session, &self.panel, &self.theme))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.panel.focus_next(),
            KeyCode::BackTab => self.panel.focus_prev(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.session.reset();
                self.panel.category_cursor = 0;
                self.panel.payment_cursor = 0;
            }
            KeyCode::Left => self.shift_days(-1),
            KeyCode::Right => self.shift_days(1),
            KeyCode::PageDown => self.shift_months(-1),
            KeyCode::PageUp => self.shift_months(1),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_at_cursor(),
            _ => {}
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn focused_bound(&self) -> Option<DateBound> {
        match self.panel.focus {
            FilterField::StartDate => Some(DateBound::Start),
            FilterField::EndDate => Some(DateBound::End),
            _ => None,
        }
    }

    fn shift_days(&mut self, days: i64) {
        if let Some(bound) = self.focused_bound() {
            self.session.shift_days(bound, days);
        }
    }

    fn shift_months(&mut self, months: i32) {
        if let Some(bound) = self.focused_bound() {
            self.session.shift_months(bound, months);
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = match self.panel.focus {
            FilterField::Categories => self.session.category_options().len(),
            FilterField::PaymentMethods => self.session.payment_options().len(),
            _ => return,
        };
        self.panel.move_cursor(delta, len);
    }

    fn toggle_at_cursor(&mut self) {
        match self.panel.focus {
            FilterField::Categories => {
                if let Some(name) = self
                    .session
                    .category_options()
                    .get(self.panel.category_cursor)
                    .cloned()
                {
                    self.session.toggle_category(&name);
                }
            }
            FilterField::PaymentMethods => {
                if let Some(name) = self
                    .session
                    .payment_options()
                    .get(self.panel.payment_cursor)
                    .cloned()
                {
                    self.session.toggle_payment_method(&name);
                }
            }
            _ => {}
        }
    }
}

/// Leave raw mode and the alternate screen, then show the cursor again.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
