//! Chart application shell: terminal setup and the display event loop.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::chart::{self, ChartFigure};
use crate::themes::Theme;

/// Owns the theme and drives the chart display loop.
pub struct ChartApp {
    pub theme: Theme,
}

impl ChartApp {
    /// Construct an application with the named theme.
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
        }
    }

    /// Display `figure` in the alternate screen until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout; the loop exits on
    /// `q`, `Q`, or `Ctrl+C`. Raw mode is always restored, including on
    /// early error return.
    pub fn run(&self, figure: &ChartFigure) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            let draw = terminal.draw(|frame| {
                let area = frame.area();
                chart::render_figure(frame, area, figure, &self.theme);
            });
            if let Err(e) = draw {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break Ok(());
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break Ok(()),
                        _ => {}
                    },
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }
        };

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }
}
