//! Action-script walker.
//!
//! Each entry is a tuple whose first field is a key; the key's
//! [`ActionKind`] decides which further fields are prompted. Control-flow
//! entries may carry a nested script, which is edited on an explicit frame
//! stack instead of by recursion: descending pushes a frame, finishing a
//! nested list pops it and commits the result into the parent entry that
//! was pending.

use super::{answered, Editor};
use crate::application::prompt::Action;
use crate::domain::schema::{ActionKind, EditOptions};
use crate::domain::value::UNSET;
use crate::domain::Literal;
use crate::error::Result;

type Entry = Vec<Literal>;

/// Control-flow entry waiting for its nested script.
#[derive(Debug)]
struct Pending {
    insert: bool,
    key: String,
    value: String,
}

#[derive(Debug)]
struct Frame {
    entries: Vec<Entry>,
    index: usize,
    level: usize,
    pending: Option<Pending>,
}

impl Frame {
    fn new(entries: Vec<Entry>, level: usize) -> Self {
        Self {
            entries,
            index: 0,
            level,
            pending: None,
        }
    }

    fn commit(&mut self, insert: bool, entry: Entry) {
        if insert {
            self.entries.insert(self.index, entry);
        } else {
            self.entries[self.index] = entry;
        }
        self.index += 1;
    }

    /// Attach a finished nested script to the pending entry.
    fn resume(&mut self, nested: &[Entry]) {
        if let Some(pending) = self.pending.take() {
            let entry = vec![
                Literal::Str(pending.key),
                Literal::Str(pending.value),
                Literal::from_tuple_list(nested),
            ];
            self.commit(pending.insert, entry);
        }
    }
}

enum Step {
    Continue,
    Done,
    Descend(Vec<Entry>),
}

fn field(entry: &[Literal], position: usize) -> String {
    entry.get(position).map(Literal::to_text).unwrap_or_default()
}

fn is_unset(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case(UNSET)
}

impl Editor<'_> {
    pub(super) fn edit_tuple_list(
        &mut self,
        entries: Vec<Entry>,
        level: usize,
        options: &EditOptions,
    ) -> Result<Vec<Entry>> {
        let mut stack = vec![Frame::new(entries, level)];

        while let Some(frame) = stack.last_mut() {
            match self.step(frame, options)? {
                Step::Continue => {}
                Step::Descend(nested) => {
                    let level = frame.level + 1;
                    stack.push(Frame::new(nested, level));
                }
                Step::Done => {
                    let Some(done) = stack.pop() else { break };
                    match stack.last_mut() {
                        Some(parent) => parent.resume(&done.entries),
                        None => return Ok(done.entries),
                    }
                }
            }
        }
        Ok(Vec::new())
    }

    fn step(&mut self, frame: &mut Frame, options: &EditOptions) -> Result<Step> {
        let theme = self.prompter.theme();
        let level = frame.level;
        let index = frame.index;

        let mut answers = if index == frame.entries.len() {
            self.prompter.say(
                level,
                &theme.warning(options.prompts.end_of_list_or("end of list")),
            )?;
            vec![Action::Insert, Action::Back, Action::Quit]
        } else {
            let shown = Literal::Tuple(frame.entries[index].clone()).to_string();
            self.prompter.say(level, &theme.current(&shown))?;
            vec![
                Action::Insert,
                Action::Modify,
                Action::Delete,
                Action::Back,
                Action::Quit,
            ]
        };
        if index == 0 {
            answers.retain(|a| *a != Action::Back);
        }

        match self.prompter.choose(&answers, level)?.copied() {
            Some(action @ (Action::Insert | Action::Modify)) => {
                let insert = action == Action::Insert;
                let existing = if insert {
                    Vec::new()
                } else {
                    frame.entries[index].clone()
                };
                match self.build_entry(&existing, level, options)? {
                    Built::Entry(entry) => frame.commit(insert, entry),
                    Built::Cancelled => {}
                    Built::Nested { key, value, nested } => {
                        frame.pending = Some(Pending { insert, key, value });
                        return Ok(Step::Descend(nested));
                    }
                }
            }
            Some(Action::Delete) => {
                frame.entries.remove(index);
            }
            Some(Action::Back) => frame.index -= 1,
            Some(Action::Quit) => return Ok(Step::Done),
            _ => frame.index += 1,
        }

        if frame.index > frame.entries.len() {
            return Ok(Step::Done);
        }
        Ok(Step::Continue)
    }

    /// Prompt for the fields of one entry, seeded from `existing`.
    fn build_entry(&mut self, existing: &[Literal], level: usize, options: &EditOptions) -> Result<Built> {
        let prompts = &options.prompts;
        let schema = &options.schema;
        let value_label = prompts.value();
        let extra_label = prompts.additional_value();
        let unset = [UNSET.to_string()];

        let key = self.prompter.read_value(
            prompts.key_or("key"),
            level,
            &field(existing, 0),
            schema.all_keys(),
        )?;
        if key.is_empty() {
            return Ok(Built::Cancelled);
        }
        let value = field(existing, 1);
        let extra = field(existing, 2);
        let presets = schema.preset_values_for(&key);
        let key_field = answered(existing.first(), key.clone());
        let value_field = |entered: String| answered(existing.get(1), entered);
        let extra_field = |entered: String| answered(existing.get(2), entered);

        let entry: Entry = match schema.kind_of(&key) {
            ActionKind::NoValue => vec![key_field],
            ActionKind::OptionalValue => {
                let value = self
                    .prompter
                    .read_value(value_label, level, &value, Some(&unset[..]))?;
                if is_unset(&value) {
                    vec![key_field]
                } else {
                    vec![key_field, value_field(value)]
                }
            }
            ActionKind::ValueAndExtra => {
                let value = self.prompter.read_value(value_label, level, &value, None)?;
                let extra = self.prompter.read_value(extra_label, level, &extra, None)?;
                vec![key_field, value_field(value), extra_field(extra)]
            }
            ActionKind::OptionalValueAndExtra => {
                let value = self.prompter.read_value(value_label, level, &value, None)?;
                let extra = self
                    .prompter
                    .read_value(extra_label, level, &extra, Some(&unset[..]))?;
                if is_unset(&extra) {
                    vec![key_field, value_field(value)]
                } else {
                    vec![key_field, value_field(value), extra_field(extra)]
                }
            }
            ActionKind::Position => {
                let value = self.capture_position(level, &value)?;
                vec![key_field, value_field(value)]
            }
            ActionKind::ControlFlow => {
                let value = self
                    .prompter
                    .read_value(value_label, level, &value, presets)?;
                let payload = existing.get(2);
                match self
                    .prompter
                    .choose(&[Action::Build, Action::Call], level)?
                    .copied()
                {
                    Some(Action::Build) => {
                        // A preset call is discarded when switching to a
                        // nested script.
                        let nested = payload
                            .and_then(Literal::as_tuple_list)
                            .unwrap_or_default();
                        return Ok(Built::Nested { key, value, nested });
                    }
                    Some(Action::Call) => {
                        let current = match payload {
                            Some(Literal::List(_)) | None => String::new(),
                            Some(other) => other.to_text(),
                        };
                        let call = self.prompter.read_value(
                            prompts.preset_additional_value(),
                            level,
                            &current,
                            schema.preset_calls(),
                        )?;
                        vec![key_field, value_field(value), extra_field(call)]
                    }
                    _ => {
                        let payload = payload.cloned().unwrap_or_else(|| Literal::Str(extra));
                        vec![key_field, value_field(value), payload]
                    }
                }
            }
            ActionKind::Generic => {
                let value = self
                    .prompter
                    .read_value(value_label, level, &value, presets)?;
                vec![key_field, value_field(value)]
            }
        };
        Ok(Built::Entry(entry))
    }
}

enum Built {
    Entry(Entry),
    /// Blank key: nothing to commit.
    Cancelled,
    Nested {
        key: String,
        value: String,
        nested: Vec<Entry>,
    },
}
