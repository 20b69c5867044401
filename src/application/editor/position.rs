//! Coordinate capture for position entries.

use super::Editor;
use crate::error::Result;

/// Normalize typed `x, y` coordinates (two non-negative integers).
#[must_use]
pub fn parse_coordinates(text: &str) -> Option<String> {
    let (x, y) = text.split_once(',')?;
    let (x, y) = (x.trim(), y.trim());
    let numeric = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    (numeric(x) && numeric(y)).then(|| format!("{x}, {y}"))
}

impl Editor<'_> {
    /// Read coordinates, typed or captured with a click.
    ///
    /// Input starting with `c` waits for a pointer click; without a pointer
    /// the request is rejected and the prompt repeats. Anything else must
    /// be `x, y`.
    pub(super) fn capture_position(&mut self, level: usize, current: &str) -> Result<String> {
        let theme = self.prompter.theme();
        let label = format!("coordinates/{}lick", theme.underline("c"));
        let completions: Vec<String> = if current.is_empty() {
            Vec::new()
        } else {
            vec![current.to_string()]
        };
        let mut shown = (!current.is_empty()).then(|| theme.current(current));

        loop {
            let prompt = match &shown {
                Some(value) => format!("{label} {value}"),
                None => label.clone(),
            };
            let entered = self.prompter.read_text(&prompt, level, &completions)?;
            let entered = if entered.is_empty() {
                current.to_string()
            } else {
                entered
            };

            if entered.to_lowercase().starts_with('c') {
                if let Some(pointer) = self.pointer.as_deref_mut() {
                    self.prompter
                        .say(level, &theme.warning("waiting for click..."))?;
                    let (x, y) = pointer.wait_for_click()?;
                    let coordinates = format!("{x}, {y}");
                    self.prompter
                        .say(level, &format!("coordinates: {coordinates}"))?;
                    return Ok(coordinates);
                }
                self.prompter
                    .say(level, &theme.warning("no pointer available; type x, y"))?;
            } else if let Some(coordinates) = parse_coordinates(&entered) {
                return Ok(coordinates);
            }
            shown = Some(theme.error(&entered));
        }
    }
}
