//! Console styling threaded through the prompt layer.

use owo_colors::OwoColorize;

/// Indentation unit per nesting level.
pub const INDENT: &str = "    ";

/// Indentation for `level`.
#[must_use]
pub fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

/// Styles for the roles text plays in prompts and listings.
///
/// A plain theme renders every role unstyled, which is what tests and
/// non-terminal output use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    colored: bool,
}

impl Theme {
    #[must_use]
    pub const fn new(colored: bool) -> Self {
        Self { colored }
    }

    #[must_use]
    pub const fn colored() -> Self {
        Self::new(true)
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self::new(false)
    }

    #[must_use]
    pub const fn is_colored(&self) -> bool {
        self.colored
    }

    /// Section headers.
    #[must_use]
    pub fn bold(&self, text: &str) -> String {
        self.paint(text, |t| t.bold().to_string())
    }

    /// Current values.
    #[must_use]
    pub fn current(&self, text: &str) -> String {
        self.paint(text, |t| t.green().to_string())
    }

    /// Rejected input.
    #[must_use]
    pub fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red().to_string())
    }

    /// Option names and dictionary keys.
    #[must_use]
    pub fn identifier(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan().to_string())
    }

    /// End-of-list markers and placeholders such as `(empty)`.
    #[must_use]
    pub fn warning(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().to_string())
    }

    /// Menu accelerators.
    #[must_use]
    pub fn underline(&self, text: &str) -> String {
        self.paint(text, |t| t.underline().to_string())
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.colored {
            style(text)
        } else {
            text.to_string()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}
