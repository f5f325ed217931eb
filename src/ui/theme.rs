//! Visual theme and styling.

use console::Style;

/// Terminal styling for feed output.
#[derive(Debug, Clone)]
pub struct FilmixoTheme {
    /// Success messages (green).
    pub success: Style,
    /// Warnings (orange).
    pub warning: Style,
    /// Errors (red bold).
    pub error: Style,
    /// Secondary text (dim).
    pub dim: Style,
    /// Post titles (bold).
    pub title: Style,
    /// Headers (red bold, the site accent).
    pub header: Style,
    /// Hints (dim italic).
    pub hint: Style,
}

impl Default for FilmixoTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl FilmixoTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            title: Style::new().bold(),
            header: Style::new().red().bold(),
            hint: Style::new().dim().italic(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            title: Style::new(),
            header: Style::new(),
            hint: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("▶"),
            self.title.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
