//! CLI module graph and command dispatch.
//!
//! - [`command`] - `clap` definitions
//! - [`defaults`] - built-in default document and section schemas
//! - [`diagnostic`] - miette rendering of malformed documents
//! - [`output`] - human and JSON output
//! - [`paths`] - per-user file locations
//! - [`terminal`] - the dialoguer-backed console
//! - [`edit`], [`check`], [`show`] - command handlers

pub mod check;
pub mod command;
pub mod defaults;
pub mod diagnostic;
pub mod edit;
pub mod output;
pub mod paths;
pub mod show;
pub mod terminal;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use self::command::{Cli, Commands};
use self::diagnostic::DocumentDiagnostic;
use self::terminal::TerminalConsole;
use crate::application::Theme;
use crate::domain::schema::EditOptions;
use crate::domain::Document;
use crate::error::{Error, Result};
use crate::infrastructure::backup::backup_file;
use crate::infrastructure::config::settings::Settings;
use crate::infrastructure::gpg::GpgKeyring;
use crate::infrastructure::store::FileStore;
use crate::port::DocumentStore;

/// Everything a command needs besides its own arguments.
pub struct Session {
    document_path: PathBuf,
    settings: Settings,
    theme: Theme,
}

impl Session {
    #[must_use]
    pub fn new(document_path: impl Into<PathBuf>, settings: Settings, theme: Theme) -> Self {
        Self {
            document_path: document_path.into(),
            settings,
            theme,
        }
    }

    #[must_use]
    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Store for the document, encrypting through the configured program.
    #[must_use]
    pub fn store(&self) -> FileStore {
        let encryption = &self.settings.encryption;
        FileStore::new(
            &self.document_path,
            Arc::new(GpgKeyring::new(encryption.program.clone())),
        )
        .with_extension(encryption.extension.clone())
    }

    #[must_use]
    pub fn console(&self) -> TerminalConsole {
        TerminalConsole::new()
    }

    /// Back up whichever artifact `store` reads from.
    pub fn backup(&self, store: &FileStore) -> Result<()> {
        let artifact = if store.is_encrypted() {
            store.encrypted_path()
        } else {
            store.path().to_path_buf()
        };
        if let Some(path) = backup_file(&artifact, &self.settings.backup.policy())? {
            debug!(backup = %path.display(), "session backup taken");
        }
        Ok(())
    }

    /// Load the stored document, showing a spinner while decrypting.
    pub fn load(&self, store: &FileStore) -> Result<Document> {
        if !store.is_encrypted() {
            return store.load();
        }
        let spinner = output::spinner("Decrypting document");
        match store.load() {
            Ok(document) => {
                output::spinner_success(&spinner, "Decrypted document");
                Ok(document)
            }
            Err(e) => {
                output::spinner_fail(&spinner, "Decryption failed");
                Err(e)
            }
        }
    }

    /// Render `error` for the terminal: a source-annotated diagnostic for
    /// malformed documents, a single line otherwise.
    pub fn report(&self, error: &Error) {
        if let Error::MalformedDocument(cause) = error {
            if !output::is_json() {
                let text = self.store().read_text().ok().flatten();
                let name = self.document_path.display().to_string();
                if let Some(diagnostic) = text
                    .as_deref()
                    .and_then(|text| DocumentDiagnostic::from_error(cause, &name, text))
                {
                    eprintln!("{:?}", diagnostic.into_report());
                    return;
                }
            }
        }
        output::error(&error.to_string());
    }
}

/// Run the parsed command.
pub fn execute(cli: &Cli, session: &Session) -> Result<()> {
    debug!(command = ?cli.command, document = %session.document_path().display(), "dispatching");
    match &cli.command {
        Commands::Edit(args) => edit::execute_section(session, &args.section),
        Commands::Option(args) => edit::execute_option(session, &args.section, &args.option, |options| {
            let mut options: EditOptions = options;
            if let Some(limits) = args.limits() {
                options = options.with_limits(limits);
            }
            if let Some(initial) = &args.initial {
                options = options.with_initial_value(initial.clone());
            }
            options
        }),
        Commands::Delete(args) => edit::execute_delete(session, &args.section, &args.option),
        Commands::Check(args) => check::execute(session, args.list),
        Commands::Show(args) => show::execute(session, args.section.as_deref()),
    }
}
