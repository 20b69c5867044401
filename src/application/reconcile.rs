//! Diff reconciler: default document against the user's document.
//!
//! The walk visits every default section that is not excluded and has
//! options. Within a section it checks the default options, followed by
//! options only the user has (unless the section ignores user extras).
//! Each differing option is shown as `option: default → user` and offers
//! `default` (drop the override and persist), `back` and `quit`.
//!
//! `back` revisits the previously shown difference, crossing section
//! boundaries through a stack of section return points.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, warn};

use super::prompt::{Action, Prompter};
use crate::domain::Document;
use crate::error::Result;
use crate::port::DocumentStore;

/// Longest value shown before truncation.
pub const MAX_SHOWN_CHARS: usize = 256;

/// Sections the walk skips or treats specially.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    pub excluded_sections: HashSet<String>,
    /// Sections whose user-only options are not compared.
    pub user_option_ignored_sections: HashSet<String>,
}

impl ReconcileOptions {
    #[must_use]
    pub fn new<I, J, S, T>(excluded_sections: I, user_option_ignored_sections: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            excluded_sections: excluded_sections.into_iter().map(Into::into).collect(),
            user_option_ignored_sections: user_option_ignored_sections
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// One option whose user value differs from the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Difference {
    pub section: String,
    pub option: String,
    /// `None` when the option only exists in the user document.
    pub default: Option<String>,
    pub user: String,
}

/// Outcome of an interactive walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Differences shown, counting revisits.
    pub shown: usize,
    /// `(section, option)` overrides reverted to the default.
    pub reverted: Vec<(String, String)>,
    /// The walk ended with `quit`.
    pub aborted: bool,
}

/// Sections compared, in default-document order.
fn compared_sections(defaults: &Document, options: &ReconcileOptions) -> Vec<String> {
    defaults
        .sections()
        .filter(|section| !options.excluded_sections.contains(*section))
        .filter(|section| defaults.options(section).is_some_and(|o| !o.is_empty()))
        .map(str::to_string)
        .collect()
}

/// Options compared within `section`.
fn compared_options(defaults: &Document, user: &Document, section: &str, options: &ReconcileOptions) -> Vec<String> {
    let mut names = defaults.options(section).unwrap_or_default();
    if !options.user_option_ignored_sections.contains(section) {
        for name in user.options(section).unwrap_or_default() {
            if !defaults.has_option(section, &name) {
                names.push(name);
            }
        }
    }
    names
}

fn difference(defaults: &Document, user: &Document, section: &str, option: &str) -> Option<Difference> {
    let user_value = user.get(section, option)?;
    let default_value = defaults.get(section, option);
    (default_value != Some(user_value)).then(|| Difference {
        section: section.to_string(),
        option: option.to_string(),
        default: default_value.map(str::to_string),
        user: user_value.to_string(),
    })
}

/// Every difference, without prompting.
#[must_use]
pub fn differences(defaults: &Document, user: &Document, options: &ReconcileOptions) -> Vec<Difference> {
    compared_sections(defaults, options)
        .iter()
        .flat_map(|section| {
            compared_options(defaults, user, section, options)
                .into_iter()
                .filter_map(move |option| difference(defaults, user, section, &option))
        })
        .collect()
}

/// Cut `text` to [`MAX_SHOWN_CHARS`] characters, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_SHOWN_CHARS) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Interactive reconciliation against a store holding the user document.
pub struct Reconciler<'a> {
    defaults: &'a Document,
    store: &'a dyn DocumentStore,
    prompter: Prompter<'a>,
    options: ReconcileOptions,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        defaults: &'a Document,
        store: &'a dyn DocumentStore,
        prompter: Prompter<'a>,
        options: ReconcileOptions,
    ) -> Self {
        Self {
            defaults,
            store,
            prompter,
            options,
        }
    }

    /// Walk every difference, applying the user's decisions.
    pub fn run(&mut self) -> Result<ReconcileReport> {
        let mut user = self.store.load()?;
        let mut report = ReconcileReport::default();
        let sections = compared_sections(self.defaults, &self.options);

        let mut section_index = 0;
        let mut section_returns: Vec<usize> = Vec::new();

        while section_index < sections.len() {
            let section = &sections[section_index];
            let options = compared_options(self.defaults, &user, section, &self.options);
            let mut option_index = 0;
            let mut option_returns: Vec<usize> = Vec::new();
            let mut leave_back = false;

            while option_index < options.len() {
                let option = &options[option_index];
                let Some(diff) = difference(self.defaults, &user, section, option) else {
                    option_index += 1;
                    continue;
                };

                if option_returns.is_empty() {
                    let theme = self.prompter.theme();
                    self.prompter
                        .say(0, &format!("[{}]", theme.bold(section)))?;
                }
                self.show(&diff)?;
                report.shown += 1;

                let mut answers = vec![Action::Default, Action::Back, Action::Quit];
                if section_returns.is_empty() && option_returns.is_empty() {
                    answers.retain(|a| *a != Action::Back);
                }

                match self.prompter.choose(&answers, 0)?.copied() {
                    Some(Action::Default) => {
                        user.remove(section, option);
                        self.store.save(&user)?;
                        info!(section = %section, option = %option, "override reverted");
                        report
                            .reverted
                            .push((section.clone(), option.clone()));
                    }
                    Some(Action::Back) => {
                        if let Some(previous) = option_returns.pop() {
                            option_index = previous;
                            continue;
                        }
                        leave_back = true;
                        break;
                    }
                    Some(Action::Quit) => {
                        warn!(reverted = report.reverted.len(), "reconciliation aborted");
                        report.aborted = true;
                        return Ok(report);
                    }
                    _ => {}
                }

                option_returns.push(option_index);
                option_index += 1;
            }

            if leave_back {
                if let Some(previous) = section_returns.pop() {
                    section_index = previous;
                    continue;
                }
            }
            if !option_returns.is_empty() {
                section_returns.push(section_index);
            }
            section_index += 1;
        }

        Ok(report)
    }

    fn show(&mut self, diff: &Difference) -> Result<()> {
        let theme = self.prompter.theme();
        let empty = theme.warning("(empty)");
        let default = match diff.default.as_deref() {
            None => theme.warning("(not exist)"),
            Some("") => empty.clone(),
            Some(value) => truncate(value),
        };
        let user = if diff.user.is_empty() {
            empty
        } else {
            theme.current(&truncate(&diff.user))
        };
        self.prompter.say(
            0,
            &format!("{}: {default} → {user}", theme.identifier(&diff.option)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::theme::Theme;
    use crate::testkit::console::ScriptedConsole;
    use crate::testkit::store::MemoryStore;

    fn defaults() -> Document {
        let mut document = Document::new();
        document.set("General", "timeout", "4");
        document.set("General", "headless", "True");
        document.set("Actions", "login", "[('get', 'https://example.com')]");
        document.add_section("Empty");
        document
    }

    #[test]
    fn default_reverts_override_and_leaves_defaults_untouched() {
        let defaults = defaults();
        let mut user = Document::new();
        user.set("General", "timeout", "9");
        let store = MemoryStore::new(user);
        let mut console = ScriptedConsole::new(["d"]);

        let report = Reconciler::new(
            &defaults,
            &store,
            Prompter::new(&mut console, Theme::plain()),
            ReconcileOptions::default(),
        )
        .run()
        .unwrap();

        assert_eq!(report.reverted, vec![("General".to_string(), "timeout".to_string())]);
        assert!(!store.saved().has_option("General", "timeout"));
        assert_eq!(defaults.get("General", "timeout"), Some("4"));
        assert_eq!(
            console.printed(),
            vec!["[General]", "timeout: 4 → 9"]
        );
        assert_eq!(console.prompts(), vec!["default/quit: "]);
    }

    #[test]
    fn second_pass_reports_no_differences() {
        let defaults = defaults();
        let mut user = Document::new();
        user.set("General", "timeout", "9");
        user.set("Actions", "login", "[]");
        let store = MemoryStore::new(user);

        let mut console = ScriptedConsole::new(["d", "d"]);
        let first = Reconciler::new(
            &defaults,
            &store,
            Prompter::new(&mut console, Theme::plain()),
            ReconcileOptions::default(),
        )
        .run()
        .unwrap();
        assert_eq!(first.shown, 2);

        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let second = Reconciler::new(
            &defaults,
            &store,
            Prompter::new(&mut console, Theme::plain()),
            ReconcileOptions::default(),
        )
        .run()
        .unwrap();
        assert_eq!(second.shown, 0);
        assert!(differences(&defaults, &store.saved(), &ReconcileOptions::default()).is_empty());
    }

    #[test]
    fn back_crosses_sections_and_quit_aborts() {
        let defaults = defaults();
        let mut user = Document::new();
        user.set("General", "timeout", "9");
        user.set("Actions", "login", "[]");
        let store = MemoryStore::new(user);
        // timeout: skip; login: back into General, where no return point
        // is left; timeout: skip; login: quit
        let mut console = ScriptedConsole::new(["", "b", "", "q"]);

        let report = Reconciler::new(
            &defaults,
            &store,
            Prompter::new(&mut console, Theme::plain()),
            ReconcileOptions::default(),
        )
        .run()
        .unwrap();

        assert!(report.aborted);
        assert_eq!(report.shown, 4);
        assert!(report.reverted.is_empty());
        assert_eq!(store.saves(), 0);
        assert_eq!(
            console.prompts(),
            vec!["default/quit: ", "default/back/quit: ", "default/quit: ", "default/back/quit: "]
        );
    }

    #[test]
    fn user_only_options_respect_ignored_sections() {
        let defaults = defaults();
        let mut user = Document::new();
        user.set("General", "extra", "");
        user.set("Actions", "custom", "[('refresh',)]");
        user.set("Unknown", "x", "1");

        let options = ReconcileOptions::new(Vec::<String>::new(), ["Actions"]);
        let found = differences(&defaults, &user, &options);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].option, "extra");
        assert_eq!(found[0].default, None);

        let store = MemoryStore::new(user);
        let mut console = ScriptedConsole::new([""]);
        Reconciler::new(&defaults, &store, Prompter::new(&mut console, Theme::plain()), options)
            .run()
            .unwrap();
        assert_eq!(console.printed()[1], "extra: (not exist) → (empty)");
    }

    #[test]
    fn excluded_sections_are_skipped() {
        let defaults = defaults();
        let mut user = Document::new();
        user.set("General", "timeout", "9");
        let options = ReconcileOptions::new(["General"], Vec::<String>::new());
        assert!(differences(&defaults, &user, &options).is_empty());
    }

    #[test]
    fn long_values_are_truncated() {
        let long = "x".repeat(300);
        let shown = truncate(&long);
        assert_eq!(shown.len(), MAX_SHOWN_CHARS + 3);
        assert!(shown.ends_with("..."));
        assert_eq!(truncate("short"), "short");
    }
}
