//! Dictionary walker: fixed key set, values edited in place.

use indexmap::IndexMap;

use super::{answered, Editor};
use crate::application::prompt::Action;
use crate::domain::schema::EditOptions;
use crate::domain::Literal;
use crate::error::Result;

impl Editor<'_> {
    pub(super) fn edit_dictionary(
        &mut self,
        mut map: IndexMap<String, Literal>,
        level: usize,
        options: &EditOptions,
    ) -> Result<IndexMap<String, Literal>> {
        let keys: Vec<String> = map.keys().cloned().collect();
        let theme = self.prompter.theme();
        let mut index = 0;

        while index < keys.len() {
            let key = &keys[index];
            let current = map.get(key).map(Literal::to_text).unwrap_or_default();
            self.prompter.say(
                level,
                &format!("{}: {}", theme.identifier(key), theme.current(&current)),
            )?;

            let mut answers = vec![Action::Modify, Action::Empty, Action::Back, Action::Quit];
            if index == 0 {
                answers.retain(|a| *a != Action::Back);
            }

            match self.prompter.choose(&answers, level)?.copied() {
                Some(Action::Modify) => {
                    let value = self.prompter.read_value(
                        options.prompts.value(),
                        level,
                        &current,
                        options.allowed.at(0),
                    )?;
                    let value = answered(map.get(key), value);
                    map.insert(key.clone(), value);
                }
                Some(Action::Empty) => {
                    map.insert(key.clone(), Literal::Str(String::new()));
                }
                Some(Action::Back) => {
                    index -= 1;
                    continue;
                }
                Some(Action::Quit) => break,
                _ => {}
            }
            index += 1;
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use crate::application::editor::Editor;
    use crate::application::prompt::Prompter;
    use crate::application::theme::Theme;
    use crate::domain::schema::EditOptions;
    use crate::domain::{Document, Literal};
    use crate::testkit::console::ScriptedConsole;
    use crate::testkit::store::MemoryStore;

    #[test]
    fn modifies_and_empties_values_without_changing_keys() {
        let mut document = Document::new();
        document.set("Variables", "limits", "{'low': '1', 'high': '9'}");
        let store = MemoryStore::default();
        // option menu: modify; low: modify -> 2; high: back; low: skip; high: empty
        let mut console = ScriptedConsole::new(["m", "m", "2", "b", "", "e"]);
        let mut editor = Editor::new(&mut document, &store, Prompter::new(&mut console, Theme::plain()));

        editor
            .edit_option("Variables", "limits", &EditOptions::new())
            .unwrap();
        assert_eq!(
            store.saved().get("Variables", "limits"),
            Some("{'low': '2', 'high': ''}")
        );
        drop(editor);

        let prompts = console.prompts();
        assert_eq!(prompts[1], "    modify/empty/quit: ");
        assert_eq!(prompts[2], "    value 1: ");
        assert_eq!(prompts[3], "    modify/empty/back/quit: ");
    }

    #[test]
    fn blank_modify_keeps_typed_values() {
        let mut map = IndexMap::new();
        map.insert("a".to_string(), Literal::None);
        map.insert("b".to_string(), Literal::Number("0.8".into()));

        let mut document = Document::new();
        let store = MemoryStore::default();
        let mut console = ScriptedConsole::new(["m", "", "m", ""]);
        let mut editor = Editor::new(&mut document, &store, Prompter::new(&mut console, Theme::plain()));

        let edited = editor.edit_dictionary(map.clone(), 1, &EditOptions::new()).unwrap();
        assert_eq!(edited, map);
    }

    #[test]
    fn quit_keeps_remaining_values() {
        let mut map = IndexMap::new();
        map.insert("a".to_string(), "x".into());
        map.insert("b".to_string(), "y".into());

        let mut document = Document::new();
        let store = MemoryStore::default();
        let mut console = ScriptedConsole::new(["q"]);
        let mut editor = Editor::new(&mut document, &store, Prompter::new(&mut console, Theme::plain()));

        let edited = editor.edit_dictionary(map.clone(), 1, &EditOptions::new()).unwrap();
        assert_eq!(edited, map);
    }
}
