//! Terminal implementation of the [`Console`] port.
//!
//! On a terminal, input is read with `dialoguer` so that tab completes
//! against the candidate words the prompt layer supplies. When stdin is
//! not a terminal (piped scripts, tests) lines are read directly and the
//! prompt is echoed to stdout.

use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::theme::Theme as PromptTheme;
use dialoguer::{Completion, Input};

use crate::error::Result;
use crate::port::Console;

/// Renders prompts exactly as the prompt layer built them.
struct PassThrough;

impl PromptTheme for PassThrough {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{prompt}")
    }

    fn format_input_prompt_selection(&self, f: &mut dyn fmt::Write, prompt: &str, sel: &str) -> fmt::Result {
        write!(f, "{prompt}{sel}")
    }
}

/// Case-insensitive prefix completion over a word list.
pub struct WordCompleter<'a> {
    words: &'a [String],
}

impl<'a> WordCompleter<'a> {
    #[must_use]
    pub fn new(words: &'a [String]) -> Self {
        Self { words }
    }
}

impl Completion for WordCompleter<'_> {
    fn get(&self, input: &str) -> Option<String> {
        let folded = input.to_lowercase();
        self.words
            .iter()
            .find(|word| word.to_lowercase().starts_with(&folded))
            .cloned()
    }
}

/// Console bound to the process's stdin and stdout.
pub struct TerminalConsole {
    interactive: bool,
}

impl TerminalConsole {
    /// Detect whether line editing is available.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal() && io::stderr().is_terminal(),
        }
    }

    fn read_plain(prompt: &str) -> Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input ended while prompting").into());
        }
        writeln!(stdout)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn print(&mut self, line: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str, completions: &[String]) -> Result<String> {
        if !self.interactive {
            return Self::read_plain(prompt);
        }

        let completer = WordCompleter::new(completions);
        let input = Input::<String>::with_theme(&PassThrough)
            .with_prompt(prompt)
            .allow_empty(true)
            .completion_with(&completer)
            .interact_text()?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_matches_prefix_case_insensitively() {
        let words = vec!["send_keys".to_string(), "sleep".to_string(), "Click".to_string()];
        let completer = WordCompleter::new(&words);
        assert_eq!(completer.get("se").as_deref(), Some("send_keys"));
        assert_eq!(completer.get("SL").as_deref(), Some("sleep"));
        assert_eq!(completer.get("cl").as_deref(), Some("Click"));
        assert_eq!(completer.get("x"), None);
    }

    #[test]
    fn empty_word_list_never_completes() {
        let completer = WordCompleter::new(&[]);
        assert_eq!(completer.get(""), None);
    }

    #[test]
    fn pass_through_theme_keeps_prompt_verbatim() {
        let mut rendered = String::new();
        PassThrough
            .format_input_prompt(&mut rendered, "value 4: ", Some("4"))
            .unwrap();
        assert_eq!(rendered, "value 4: ");

        let mut rendered = String::new();
        PassThrough
            .format_input_prompt_selection(&mut rendered, "value: ", "9")
            .unwrap();
        assert_eq!(rendered, "value: 9");
    }
}
