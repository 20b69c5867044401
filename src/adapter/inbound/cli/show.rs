//! `show` command handler.

use serde::Serialize;
use serde_json::json;
use tabled::{Table, Tabled};

use super::defaults::default_document;
use super::edit::working_document_from;
use super::{output, Session};
use crate::application::reconcile::truncate;
use crate::domain::{codec, Document};
use crate::error::Result;

#[derive(Debug, Tabled, Serialize)]
pub struct SectionRow {
    #[tabled(rename = "Section")]
    pub section: String,
    #[tabled(rename = "Options")]
    pub options: usize,
}

#[derive(Debug, Tabled, Serialize)]
pub struct OptionRow {
    #[tabled(rename = "Option")]
    pub option: String,
    #[tabled(rename = "Kind")]
    pub kind: &'static str,
    #[tabled(rename = "Source")]
    pub source: &'static str,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Option counts per section of `document`.
#[must_use]
pub fn section_rows(document: &Document) -> Vec<SectionRow> {
    document
        .sections()
        .map(|section| SectionRow {
            section: section.to_string(),
            options: document.options(section).map_or(0, |options| options.len()),
        })
        .collect()
}

/// Options of `section` in the merged view, marking where each value comes
/// from. `None` when the section does not exist.
pub fn option_rows(defaults: &Document, user: &Document, section: &str) -> Result<Option<Vec<OptionRow>>> {
    let merged = working_document_from(defaults, user);
    let Some(options) = merged.options(section) else {
        return Ok(None);
    };

    let mut rows = Vec::with_capacity(options.len());
    for option in options {
        let value = merged.get(section, &option).unwrap_or_default();
        let source = match (defaults.get(section, &option), user.get(section, &option)) {
            (_, None) => "default",
            (Some(default), Some(current)) if default == current => "default",
            (None, Some(_)) => "user",
            (Some(_), Some(_)) => "override",
        };
        rows.push(OptionRow {
            kind: codec::decode(value)?.kind(),
            source,
            value: truncate(value),
            option,
        });
    }
    Ok(Some(rows))
}

pub(super) fn execute(session: &Session, section: Option<&str>) -> Result<()> {
    let store = session.store();
    let user = session.load(&store)?;
    let defaults = default_document();

    let Some(section) = section else {
        let rows = section_rows(&working_document_from(&defaults, &user));
        if output::is_json() {
            output::json_output(json!({ "command": "show", "sections": rows }));
        } else {
            output::lines(&Table::new(rows).to_string());
        }
        return Ok(());
    };

    let Some(rows) = option_rows(&defaults, &user, section)? else {
        output::error(&format!("{section} section does not exist."));
        return Ok(());
    };
    if output::is_json() {
        output::json_output(json!({
            "command": "show",
            "section": section,
            "options": rows,
        }));
    } else {
        output::section(section);
        output::lines(&Table::new(rows).to_string());
    }
    Ok(())
}
