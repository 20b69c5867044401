//! `edit`, `option` and `delete` command handlers.
//!
//! Edits run over the defaults merged with the user's document, so every
//! default option can be changed in place; the merged view is what gets
//! saved. Deletion works on the user's document alone and therefore
//! reverts a default option to its built-in value.

use serde_json::json;

use super::defaults::{default_document, edit_options};
use super::{output, Session};
use crate::application::{Editor, OptionOutcome, Prompter, Theme};
use crate::domain::schema::EditOptions;
use crate::domain::Document;
use crate::error::Result;
use crate::port::{Console, DocumentStore};

/// Defaults overlaid with the stored document.
pub fn working_document(defaults: &Document, store: &dyn DocumentStore) -> Result<Document> {
    Ok(working_document_from(defaults, &store.load()?))
}

/// Defaults overlaid with `user`.
#[must_use]
pub fn working_document_from(defaults: &Document, user: &Document) -> Document {
    let mut document = defaults.clone();
    document.merge(user);
    document
}

/// Walk every option of `section`. Returns `false` when it does not exist.
pub fn edit_section(
    store: &dyn DocumentStore,
    console: &mut dyn Console,
    theme: Theme,
    section: &str,
) -> Result<bool> {
    let mut document = working_document(&default_document(), store)?;
    let options = edit_options(section, &document);
    let mut editor = Editor::new(&mut document, store, Prompter::new(console, theme));
    editor.edit_section(section, &options)
}

/// Offer the option menu for a single option.
///
/// `tune` adjusts the section's editing options (limits, initial value).
pub fn edit_option(
    store: &dyn DocumentStore,
    console: &mut dyn Console,
    theme: Theme,
    section: &str,
    option: &str,
    tune: impl FnOnce(EditOptions) -> EditOptions,
) -> Result<OptionOutcome> {
    let mut document = working_document(&default_document(), store)?;
    let options = tune(edit_options(section, &document).with_back(false));
    let mut editor = Editor::new(&mut document, store, Prompter::new(console, theme));
    editor.edit_option(section, option, &options)
}

/// Delete `option` from the stored document.
pub fn delete_option(
    store: &dyn DocumentStore,
    console: &mut dyn Console,
    theme: Theme,
    section: &str,
    option: &str,
) -> Result<bool> {
    let mut document = store.load()?;
    let mut editor = Editor::new(&mut document, store, Prompter::new(console, theme));
    editor.delete_option(section, option)
}

pub(super) fn execute_section(session: &Session, section: &str) -> Result<()> {
    let store = session.store();
    session.backup(&store)?;
    let mut console = session.console();
    let found = edit_section(&store, &mut console, session.theme(), section)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "edit",
            "section": section,
            "found": found,
        }));
    }
    Ok(())
}

pub(super) fn execute_option(
    session: &Session,
    section: &str,
    option: &str,
    tune: impl FnOnce(EditOptions) -> EditOptions,
) -> Result<()> {
    let store = session.store();
    let mut console = session.console();
    let outcome = edit_option(&store, &mut console, session.theme(), section, option, tune)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "option",
            "section": section,
            "option": option,
            "outcome": format!("{outcome:?}").to_lowercase(),
        }));
    }
    Ok(())
}

pub(super) fn execute_delete(session: &Session, section: &str, option: &str) -> Result<()> {
    let store = session.store();
    let mut console = session.console();
    let deleted = delete_option(&store, &mut console, session.theme(), section, option)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "delete",
            "section": section,
            "option": option,
            "deleted": deleted,
        }));
    } else if deleted {
        output::success(&format!("deleted {}", output::highlight(format!("[{section}] {option}"))));
    }
    Ok(())
}
