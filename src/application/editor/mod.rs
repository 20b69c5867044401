//! Node editor: menu-driven navigation and mutation of a document.
//!
//! The editor walks one section (or one option) at a time. Every accepted
//! mutation is written back through the [`DocumentStore`] before control
//! returns to the menu loop, so the persisted document always reflects the
//! last accepted edit.
//!
//! Structured values are edited by dedicated walkers:
//!
//! - [`dictionary`] - fixed key set, per-key modify/empty
//! - [`tuple`] - positional fields, fixed or free arity
//! - [`tuple_list`] - action scripts, driven by an explicit frame stack
//! - [`position`] - coordinate capture for position entries

mod dictionary;
mod position;
mod tuple;
mod tuple_list;

use tracing::{debug, info};

use super::prompt::{Action, Prompter};
use crate::domain::codec;
use crate::domain::document::parse_strict_bool;
use crate::domain::schema::EditOptions;
use crate::domain::{Document, Literal, Value};
use crate::error::Result;
use crate::port::{DocumentStore, Pointer};

pub use position::parse_coordinates;

/// Literal for an answered value prompt. An answer that leaves the shown
/// text unchanged keeps the existing literal, so `1`, `0.8`, `True` and
/// `None` stay typed; anything else is stored as a string.
fn answered(existing: Option<&Literal>, entered: String) -> Literal {
    match existing {
        Some(literal) if literal.to_text() == entered => literal.clone(),
        _ => Literal::Str(entered),
    }
}

/// How an option menu ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOutcome {
    /// A new value was stored and persisted.
    Saved,
    /// The option was deleted.
    Removed,
    /// The option did not exist.
    Missing,
    /// Blank answer: leave the option as it is and move on.
    Skipped,
    /// Step to the previous option.
    Back,
    /// Stop editing.
    Quit,
}

/// Interactive editing session over one document.
pub struct Editor<'a> {
    document: &'a mut Document,
    store: &'a dyn DocumentStore,
    prompter: Prompter<'a>,
    pointer: Option<&'a mut dyn Pointer>,
}

impl<'a> Editor<'a> {
    pub fn new(document: &'a mut Document, store: &'a dyn DocumentStore, prompter: Prompter<'a>) -> Self {
        Self {
            document,
            store,
            prompter,
            pointer: None,
        }
    }

    /// Attach a pointer for `click` coordinate capture.
    #[must_use]
    pub fn with_pointer(mut self, pointer: &'a mut dyn Pointer) -> Self {
        self.pointer = Some(pointer);
        self
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        self.document
    }

    fn persist(&self) -> Result<()> {
        self.store.save(self.document)
    }

    /// Walk every option of `section`, then offer an end-of-section menu
    /// when `options.can_insert_delete` is set.
    ///
    /// Returns `false` when the section does not exist.
    pub fn edit_section(&mut self, section: &str, options: &EditOptions) -> Result<bool> {
        let Some(mut names) = self.document.options(section) else {
            self.prompter
                .say(0, &format!("{section} section does not exist."))?;
            return Ok(false);
        };

        let mut index = 0;
        loop {
            if index < names.len() {
                let can_back = index > 0 && options.can_back;
                match self.edit_option_at(section, &names[index], options, can_back)? {
                    OptionOutcome::Back => {
                        index = index.saturating_sub(1);
                        continue;
                    }
                    OptionOutcome::Quit => break,
                    _ => {}
                }
                index += 1;
                continue;
            }
            if !options.can_insert_delete || index > names.len() {
                break;
            }

            let theme = self.prompter.theme();
            self.prompter.say(
                0,
                &theme.warning(options.prompts.end_of_list_or("end of section")),
            )?;
            let mut answers = vec![Action::Insert, Action::Back, Action::Quit];
            if index == 0 {
                answers.retain(|a| *a != Action::Back);
            }

            match self.prompter.choose(&answers, 0)?.copied() {
                Some(Action::Insert) => {
                    let name = self
                        .prompter
                        .read_value(options.prompts.key_or("option"), 0, "", None)?;
                    match self.new_option_value(options)? {
                        Some(value) if !name.is_empty() => {
                            self.document.set(section, &name, value);
                            self.persist()?;
                            info!(section, option = %name, "option inserted");
                            if !names.contains(&name) {
                                names.push(name);
                                index += 1;
                            }
                        }
                        // A cancelled insert leaves nothing behind.
                        _ => break,
                    }
                }
                Some(Action::Back) => index = index.saturating_sub(1),
                _ => break,
            }
        }
        Ok(true)
    }

    /// Initial value for an inserted option, or `None` when cancelled.
    fn new_option_value(&mut self, options: &EditOptions) -> Result<Option<String>> {
        if options.allowed.is_any() {
            let value = self.prompter.read_value(options.prompts.value(), 0, "", None)?;
            return Ok((!value.is_empty()).then_some(value));
        }
        let items = self.edit_tuple(Vec::new(), 1, options)?;
        Ok((!items.is_empty()).then(|| codec::encode(&Value::Tuple(items))))
    }

    /// Offer the option menu for one option.
    pub fn edit_option(&mut self, section: &str, option: &str, options: &EditOptions) -> Result<OptionOutcome> {
        self.edit_option_at(section, option, options, options.can_back)
    }

    fn edit_option_at(
        &mut self,
        section: &str,
        option: &str,
        options: &EditOptions,
        can_back: bool,
    ) -> Result<OptionOutcome> {
        if let Some(initial) = options.initial_value.as_deref().filter(|v| !v.is_empty()) {
            if !self.document.has_option(section, option) {
                self.document.set(section, option, initial);
            }
        }
        let Some(current) = self.document.get(section, option).map(str::to_string) else {
            self.prompter
                .say(0, &format!("{option} option does not exist."))?;
            return Ok(OptionOutcome::Missing);
        };

        let theme = self.prompter.theme();
        self.prompter.say(
            0,
            &format!("{} = {}", theme.identifier(option), theme.current(&current)),
        )?;

        let boolean = parse_strict_bool(&current);
        let mut answers = vec![Action::Modify];
        if boolean.is_some() {
            answers.push(Action::Toggle);
        }
        answers.push(Action::Empty);
        answers.push(if options.can_insert_delete {
            Action::Delete
        } else {
            Action::Default
        });
        if can_back {
            answers.push(Action::Back);
        }
        answers.push(Action::Quit);

        let updated = match self.prompter.choose(&answers, 0)?.copied() {
            Some(Action::Modify) => match codec::decode(&current)? {
                Value::Dictionary(map) => {
                    let map = self.edit_dictionary(map, 1, options)?;
                    codec::encode(&Value::Dictionary(map))
                }
                Value::Tuple(items) => {
                    let items = self.edit_tuple(items, 1, options)?;
                    codec::encode(&Value::Tuple(items))
                }
                Value::TupleList(mut entries) => {
                    if entries == [Vec::new()] {
                        entries.clear();
                    }
                    let entries = self.edit_tuple_list(entries, 0, options)?;
                    if entries.is_empty() {
                        self.delete_option(section, option)?;
                        return Ok(OptionOutcome::Removed);
                    }
                    codec::encode(&Value::TupleList(entries))
                }
                Value::Scalar(_) => match options.limits {
                    Some(limits) => self.prompter.read_number(
                        options.prompts.value(),
                        0,
                        &current,
                        limits,
                    )?,
                    None => self
                        .prompter
                        .read_value(options.prompts.value(), 0, &current, None)?,
                },
            },
            Some(Action::Toggle) => {
                if boolean == Some(true) { "False" } else { "True" }.to_string()
            }
            Some(Action::Empty) => String::new(),
            Some(Action::Default | Action::Delete) => {
                self.delete_option(section, option)?;
                return Ok(OptionOutcome::Removed);
            }
            Some(Action::Back) => return Ok(OptionOutcome::Back),
            answer => {
                if options.initial_value.as_deref() == Some(current.as_str()) {
                    self.delete_option(section, option)?;
                    return Ok(OptionOutcome::Removed);
                }
                return Ok(if answer.is_none() {
                    OptionOutcome::Skipped
                } else {
                    OptionOutcome::Quit
                });
            }
        };

        self.document.set(section, option, updated);
        self.persist()?;
        debug!(section, option, "option saved");
        Ok(OptionOutcome::Saved)
    }

    /// Remove `option` and persist. Returns `false`, after reporting it,
    /// when the option does not exist.
    pub fn delete_option(&mut self, section: &str, option: &str) -> Result<bool> {
        if self.document.remove(section, option) {
            self.persist()?;
            info!(section, option, "option removed");
            return Ok(true);
        }
        self.prompter
            .say(0, &format!("{option} option does not exist."))?;
        Ok(false)
    }
}
