//! Tuple walker: positional fields with fixed or free arity.
//!
//! With per-position labels (`prompts.values`) the arity is fixed: only
//! `modify`/`empty` are offered and the walk stops once the cursor passes
//! the last labelled position. Without them `insert`/`delete` are offered
//! at every position, including the synthetic end-of-tuple position.

use super::{answered, Editor};
use crate::application::prompt::Action;
use crate::domain::schema::EditOptions;
use crate::domain::Literal;
use crate::error::Result;

impl Editor<'_> {
    pub(super) fn edit_tuple(
        &mut self,
        mut items: Vec<Literal>,
        level: usize,
        options: &EditOptions,
    ) -> Result<Vec<Literal>> {
        let labels = &options.prompts.values;
        let theme = self.prompter.theme();
        let mut index = 0;

        while index <= items.len() {
            let mut answers = if index == items.len() {
                self.prompter.say(
                    level,
                    &theme.warning(options.prompts.end_of_list_or("end of tuple")),
                )?;
                vec![Action::Insert, Action::Back, Action::Quit]
            } else {
                self.prompter
                    .say(level, &theme.current(&items[index].to_text()))?;
                if labels.is_empty() {
                    vec![
                        Action::Insert,
                        Action::Modify,
                        Action::Delete,
                        Action::Back,
                        Action::Quit,
                    ]
                } else {
                    vec![Action::Modify, Action::Empty, Action::Back, Action::Quit]
                }
            };
            if index == 0 {
                answers.retain(|a| *a != Action::Back);
            }

            match self.prompter.choose(&answers, level)?.copied() {
                Some(action @ (Action::Insert | Action::Modify)) => {
                    let current = match action {
                        Action::Modify => items[index].to_text(),
                        _ => String::new(),
                    };
                    let label = labels
                        .get(index)
                        .map_or(options.prompts.value(), String::as_str);
                    let value =
                        self.prompter
                            .read_value(label, level, &current, options.allowed.at(index))?;
                    if action == Action::Insert {
                        items.insert(index, Literal::Str(value));
                    } else {
                        let value = answered(items.get(index), value);
                        items[index] = value;
                    }
                }
                Some(Action::Empty) => items[index] = Literal::Str(String::new()),
                Some(Action::Delete) => {
                    items.remove(index);
                    continue;
                }
                Some(Action::Back) => {
                    index -= 1;
                    continue;
                }
                Some(Action::Quit) => break,
                _ => {}
            }

            index += 1;
            if !labels.is_empty() && index == labels.len() {
                break;
            }
        }
        Ok(items)
    }
}
