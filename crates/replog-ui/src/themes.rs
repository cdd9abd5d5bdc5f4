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
/// 0-6 are considered dark; 7-15 are considered light. If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
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

/// Theme definition carrying all the styles the chart views use.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Chart title.
    pub title: Style,
    /// Axis lines and tick labels.
    pub axis: Style,
    /// Surrounding block border.
    pub border: Style,
    /// Plain text (legend entries, hints).
    pub text: Style,
    /// De-emphasized text.
    pub dim: Style,
    /// Colors cycled through for stack layers and month lines.
    pub series_colors: Vec<Color>,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            axis: Style::default().fg(Color::Gray),
            border: Style::default().fg(Color::DarkGray),
            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            series_colors: vec![
                Color::Cyan,
                Color::Yellow,
                Color::Green,
                Color::Magenta,
                Color::Blue,
                Color::Red,
                Color::LightCyan,
                Color::LightYellow,
            ],
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            axis: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            series_colors: vec![
                Color::Blue,
                Color::Red,
                Color::Green,
                Color::Magenta,
                Color::Cyan,
                Color::Yellow,
            ],
        }
    }

    /// Minimal theme without bold modifiers, for terminals with limited
    /// style support.
    pub fn classic() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan),
            axis: Style::default().fg(Color::Gray),
            border: Style::default().fg(Color::DarkGray),
            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            series_colors: vec![
                Color::Cyan,
                Color::Yellow,
                Color::Green,
                Color::Magenta,
            ],
        }
    }

    /// Pick a theme based on terminal background detection.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a theme from its CLI name; anything unrecognized (including
    /// `"auto"`) falls through to detection.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Color for series `index`, cycling through the palette.
    pub fn series_color(&self, index: usize) -> Color {
        self.series_colors[index % self.series_colors.len()]
    }
}
