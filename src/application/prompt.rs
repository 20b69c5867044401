//! Mnemonic menus and value prompts.
//!
//! A menu renders as `word1/word2/.../wordN: ` with one accelerator
//! character per word. Accelerators are assigned left to right: each word
//! takes its first character not already claimed by an earlier word.

use tracing::debug;

use super::theme::{indent, Theme};
use crate::domain::schema::Limits;
use crate::domain::value::UNSET;
use crate::error::{Error, Result};
use crate::port::Console;

/// Menu vocabulary shared by the editor and the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Insert,
    Modify,
    Toggle,
    Empty,
    Delete,
    Default,
    Back,
    Quit,
    Build,
    Call,
}

impl Action {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Modify => "modify",
            Self::Toggle => "toggle",
            Self::Empty => "empty",
            Self::Delete => "delete",
            Self::Default => "default",
            Self::Back => "back",
            Self::Quit => "quit",
            Self::Build => "build",
            Self::Call => "call",
        }
    }
}

impl AsRef<str> for Action {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Accelerator assigned to one menu word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accelerator {
    /// Byte offset of the highlighted character within the word.
    pub offset: usize,
    /// Lower-cased key that selects the word.
    pub key: char,
}

fn fold(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Assign accelerators to `words`.
///
/// A word whose every character is already taken cannot be selected; that
/// is a defect in the caller's vocabulary and is reported as
/// [`Error::MnemonicCollision`].
pub fn accelerators<W: AsRef<str>>(words: &[W]) -> Result<Vec<Accelerator>> {
    let mut assigned: Vec<Accelerator> = Vec::with_capacity(words.len());
    for word in words {
        let word = word.as_ref();
        let free = word
            .char_indices()
            .find(|(_, ch)| assigned.iter().all(|a| a.key != fold(*ch)));
        match free {
            Some((offset, ch)) => assigned.push(Accelerator {
                offset,
                key: fold(ch),
            }),
            None => {
                return Err(Error::MnemonicCollision {
                    word: word.to_string(),
                    words: words.iter().map(|w| w.as_ref().to_string()).collect(),
                })
            }
        }
    }
    Ok(assigned)
}

/// Render `words` as a slash-separated menu with accelerators underlined.
#[must_use]
pub fn render_menu<W: AsRef<str>>(words: &[W], accelerators: &[Accelerator], theme: Theme) -> String {
    words
        .iter()
        .zip(accelerators)
        .map(|(word, accelerator)| {
            let word = word.as_ref();
            let start = accelerator.offset;
            let end = word[start..]
                .chars()
                .next()
                .map_or(start, |ch| start + ch.len_utf8());
            format!(
                "{}{}{}",
                &word[..start],
                theme.underline(&word[start..end]),
                &word[end..]
            )
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Coerce `raw` to a number of the kind `limits` names and clamp it.
pub fn clamp_number(raw: &str, limits: Limits) -> Result<String> {
    let invalid = |reason: String| Error::InvalidNumber {
        input: raw.to_string(),
        reason,
    };
    let parsed: f64 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;

    match limits {
        Limits::Int { min, max } => {
            if !parsed.is_finite() {
                return Err(invalid("not a finite number".to_string()));
            }
            #[allow(clippy::cast_possible_truncation)]
            let number = parsed.trunc() as i64;
            Ok(number.max(min).min(max).to_string())
        }
        // NaN clamps to the lower bound, infinities to the nearer one.
        Limits::Float { min, max } => Ok(float_text(parsed.max(min).min(max))),
    }
}

/// Shortest round-trip text of `number`, with a signed two-digit exponent
/// in scientific form (`1e-07`, `1.5e+16`).
fn float_text(number: f64) -> String {
    let shortest = format!("{number:?}");
    let Some((mantissa, exponent)) = shortest.split_once('e') else {
        return shortest;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Prompt collaborator: renders menus and value prompts on a [`Console`].
pub struct Prompter<'c> {
    console: &'c mut dyn Console,
    theme: Theme,
}

impl<'c> Prompter<'c> {
    pub fn new(console: &'c mut dyn Console, theme: Theme) -> Self {
        Self { console, theme }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Print `text` indented for `level`.
    pub fn say(&mut self, level: usize, text: &str) -> Result<()> {
        self.console.print(&format!("{}{text}", indent(level)))
    }

    /// Offer `words` as a menu and resolve the answer.
    ///
    /// Blank input or an unknown accelerator yields `None`.
    pub fn choose<'w, W: AsRef<str>>(&mut self, words: &'w [W], level: usize) -> Result<Option<&'w W>> {
        let accelerators = accelerators(words)?;
        let menu = render_menu(words, &accelerators, self.theme);
        let answer = self
            .console
            .read_line(&format!("{}{menu}: ", indent(level)), &[])?;

        let Some(first) = answer.trim().chars().next() else {
            return Ok(None);
        };
        let key = fold(first);
        let chosen = accelerators
            .iter()
            .position(|a| a.key == key)
            .map(|index| &words[index]);
        let word: Option<&str> = chosen.map(AsRef::as_ref);
        debug!(answer = %answer.trim(), chosen = ?word, "menu answer");
        Ok(chosen)
    }

    /// Read a value, keeping `current` on blank input.
    ///
    /// With `allowed`, entries outside the set are shown back in error
    /// style and re-prompted. Blank input, the unset sentinel and members
    /// of the set are accepted; a set holding only the sentinel accepts
    /// anything and merely drives completion.
    pub fn read_value(
        &mut self,
        label: &str,
        level: usize,
        current: &str,
        allowed: Option<&[String]>,
    ) -> Result<String> {
        let completions: Vec<String> = match allowed {
            Some(values) => values.to_vec(),
            None if !current.is_empty() => vec![current.to_string()],
            None => Vec::new(),
        };
        let mut shown = (!current.is_empty()).then(|| self.theme.current(current));

        loop {
            let prompt = match &shown {
                Some(value) => format!("{}{label} {value}: ", indent(level)),
                None => format!("{}{label}: ", indent(level)),
            };
            let entered = self.console.read_line(&prompt, &completions)?;
            let entered = entered.trim();
            let value = if entered.is_empty() {
                current.to_string()
            } else {
                entered.to_string()
            };

            if is_acceptable(&value, allowed) {
                return Ok(value);
            }
            shown = Some(self.theme.error(&value));
        }
    }

    /// Read a value and coerce it into `limits`.
    ///
    /// Non-numeric input is [`Error::InvalidNumber`]; numeric fields are a
    /// caller contract, not something the user can retry.
    pub fn read_number(&mut self, label: &str, level: usize, current: &str, limits: Limits) -> Result<String> {
        let raw = self.read_value(label, level, current, None)?;
        clamp_number(&raw, limits)
    }

    /// Read raw text with explicit completions and no validation.
    pub fn read_text(&mut self, prompt: &str, level: usize, completions: &[String]) -> Result<String> {
        let entered = self
            .console
            .read_line(&format!("{}{prompt}: ", indent(level)), completions)?;
        Ok(entered.trim().to_string())
    }
}

fn is_acceptable(value: &str, allowed: Option<&[String]>) -> bool {
    match allowed {
        None => true,
        Some(values) => {
            value.is_empty()
                || value.eq_ignore_ascii_case(UNSET)
                || (values.len() == 1 && values[0] == UNSET)
                || values.iter().any(|candidate| candidate == value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::console::ScriptedConsole;

    #[test]
    fn accelerators_take_first_free_character() {
        let words = ["modify", "toggle", "empty", "default", "back", "quit"];
        let keys: Vec<char> = accelerators(&words).unwrap().iter().map(|a| a.key).collect();
        assert_eq!(keys, vec!['m', 't', 'e', 'd', 'b', 'q']);

        let words = ["default", "delete"];
        let assigned = accelerators(&words).unwrap();
        assert_eq!(assigned[1], Accelerator { offset: 1, key: 'e' });
    }

    #[test]
    fn accelerators_ignore_case() {
        let words = ["Apple", "avocado"];
        let keys: Vec<char> = accelerators(&words).unwrap().iter().map(|a| a.key).collect();
        assert_eq!(keys, vec!['a', 'v']);
    }

    #[test]
    fn exhausted_word_is_a_collision() {
        match accelerators(&["a", "a"]) {
            Err(Error::MnemonicCollision { word, .. }) => assert_eq!(word, "a"),
            other => panic!("expected collision, got {other:?}"),
        }
        assert!(accelerators(&["ab", "ba", "ab"]).is_err());
        assert!(accelerators(&[""]).is_err());
    }

    #[test]
    fn menu_underlines_accelerators() {
        let words = ["insert", "back", "quit"];
        let assigned = accelerators(&words).unwrap();
        assert_eq!(render_menu(&words, &assigned, Theme::plain()), "insert/back/quit");

        let colored = render_menu(&words, &assigned, Theme::colored());
        assert!(colored.contains("\u{1b}[4m"));
    }

    #[test]
    fn choose_matches_first_character_case_insensitively() {
        let mut console = ScriptedConsole::new(["Q", "", "z", "delete"]);
        let mut prompter = Prompter::new(&mut console, Theme::plain());
        let words = [Action::Modify, Action::Default, Action::Quit];

        assert_eq!(prompter.choose(&words, 1).unwrap(), Some(&Action::Quit));
        assert_eq!(prompter.choose(&words, 1).unwrap(), None);
        assert_eq!(prompter.choose(&words, 1).unwrap(), None);
        assert_eq!(prompter.choose(&words, 1).unwrap(), Some(&Action::Default));
        drop(prompter);

        assert_eq!(console.prompts()[0], "    modify/default/quit: ");
    }

    #[test]
    fn read_value_keeps_current_on_blank() {
        let mut console = ScriptedConsole::new(["", "new"]);
        let mut prompter = Prompter::new(&mut console, Theme::plain());
        assert_eq!(prompter.read_value("value", 0, "old", None).unwrap(), "old");
        assert_eq!(prompter.read_value("value", 0, "old", None).unwrap(), "new");
        drop(prompter);

        assert_eq!(console.prompts(), vec!["value old: ", "value old: "]);
    }

    #[test]
    fn read_value_reprompts_outside_allowed_set() {
        let allowed = vec!["get".to_string(), "click".to_string()];
        let mut console = ScriptedConsole::new(["gte", "click"]);
        let mut prompter = Prompter::new(&mut console, Theme::plain());
        assert_eq!(prompter.read_value("key", 1, "", Some(allowed.as_slice())).unwrap(), "click");
        drop(prompter);

        assert_eq!(console.prompts(), vec!["    key: ", "    key gte: "]);
    }

    #[test]
    fn sentinel_only_set_accepts_anything() {
        let allowed = vec![UNSET.to_string()];
        let mut console = ScriptedConsole::new(["anything"]);
        let mut prompter = Prompter::new(&mut console, Theme::plain());
        assert_eq!(prompter.read_value("value", 0, "", Some(allowed.as_slice())).unwrap(), "anything");
    }

    #[test]
    fn numbers_are_clamped() {
        let limits = Limits::Int { min: 0, max: 10 };
        let mut console = ScriptedConsole::new(["", "-5", "7.9"]);
        let mut prompter = Prompter::new(&mut console, Theme::plain());
        assert_eq!(prompter.read_number("x", 0, "50", limits).unwrap(), "10");
        assert_eq!(prompter.read_number("x", 0, "50", limits).unwrap(), "0");
        assert_eq!(prompter.read_number("x", 0, "50", limits).unwrap(), "7");
    }

    #[test]
    fn float_limits_keep_float_form() {
        let limits = Limits::Float { min: 0.0, max: 1.0 };
        assert_eq!(clamp_number("0.25", limits).unwrap(), "0.25");
        assert_eq!(clamp_number("3", limits).unwrap(), "1.0");
    }

    #[test]
    fn float_exponents_are_signed_and_padded() {
        let limits = Limits::Float {
            min: f64::MIN,
            max: f64::MAX,
        };
        assert_eq!(clamp_number("0.0000001", limits).unwrap(), "1e-07");
        assert_eq!(clamp_number("1e16", limits).unwrap(), "1e+16");
        assert_eq!(clamp_number("15000000000000000", limits).unwrap(), "1.5e+16");
        assert_eq!(clamp_number("2.5e-120", limits).unwrap(), "2.5e-120");
        assert_eq!(clamp_number("123.5", limits).unwrap(), "123.5");
    }

    #[test]
    fn infinite_floats_clamp_to_the_bounds() {
        let limits = Limits::Float { min: 0.0, max: 10.0 };
        assert_eq!(clamp_number("inf", limits).unwrap(), "10.0");
        assert_eq!(clamp_number("-inf", limits).unwrap(), "0.0");
        assert_eq!(clamp_number("nan", limits).unwrap(), "0.0");
    }

    #[test]
    fn non_numeric_input_is_fatal() {
        let limits = Limits::Int { min: 0, max: 10 };
        match clamp_number("ten", limits) {
            Err(err @ Error::InvalidNumber { .. }) => assert_eq!(err.exit_code(), 2),
            other => panic!("expected invalid number, got {other:?}"),
        }
        assert!(clamp_number("inf", limits).is_err());
    }
}
