//! Console port for interactive prompting.

use crate::error::Result;

/// Line-oriented terminal used by the prompt layer.
///
/// Implementations receive fully rendered text (indentation and styling
/// already applied) so that rendering stays testable without a terminal.
pub trait Console {
    /// Print one line of output.
    fn print(&mut self, line: &str) -> Result<()>;

    /// Show `prompt` and read one line of input.
    ///
    /// `completions` are candidate words for tab completion; an empty
    /// slice disables completion.
    fn read_line(&mut self, prompt: &str, completions: &[String]) -> Result<String>;
}
