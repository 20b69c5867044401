//! `check` command handler: reconcile the document against the defaults.

use serde_json::json;
use tabled::{Table, Tabled};

use super::defaults::default_document;
use super::{output, Session};
use crate::application::reconcile::{differences, truncate, Difference};
use crate::application::{Prompter, ReconcileOptions, ReconcileReport, Reconciler, Theme};
use crate::error::Result;
use crate::port::{Console, DocumentStore};

#[derive(Tabled)]
struct DifferenceRow {
    #[tabled(rename = "Section")]
    section: String,
    #[tabled(rename = "Option")]
    option: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Current")]
    user: String,
}

impl From<&Difference> for DifferenceRow {
    fn from(diff: &Difference) -> Self {
        Self {
            section: diff.section.clone(),
            option: diff.option.clone(),
            default: diff
                .default
                .as_deref()
                .map_or_else(|| "(not exist)".to_string(), truncate),
            user: truncate(&diff.user),
        }
    }
}

/// Walk every override interactively.
pub fn reconcile(
    store: &dyn DocumentStore,
    console: &mut dyn Console,
    theme: Theme,
    options: ReconcileOptions,
) -> Result<ReconcileReport> {
    let defaults = default_document();
    Reconciler::new(&defaults, store, Prompter::new(console, theme), options).run()
}

pub(super) fn execute(session: &Session, list: bool) -> Result<()> {
    let store = session.store();
    let options = session.settings().reconcile.options();

    if list {
        let user = session.load(&store)?;
        return print_differences(&differences(&default_document(), &user, &options));
    }

    session.backup(&store)?;
    let mut console = session.console();
    let report = reconcile(&store, &mut console, session.theme(), options)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check",
            "report": report,
        }));
        return Ok(());
    }
    if report.aborted {
        output::warning(&format!("stopped after reverting {} override(s)", report.reverted.len()));
    } else if report.shown == 0 {
        output::success("document matches the defaults");
    } else {
        output::success(&format!("reverted {} override(s)", report.reverted.len()));
    }
    Ok(())
}

fn print_differences(found: &[Difference]) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "check",
            "differences": found,
        }));
        return Ok(());
    }
    if found.is_empty() {
        output::success("document matches the defaults");
        return Ok(());
    }

    let rows: Vec<DifferenceRow> = found.iter().map(DifferenceRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    output::hint(&format!(
        "run {} to revert overrides interactively",
        output::highlight("trading-peripheral check")
    ));
    Ok(())
}
