//! Command-line interface definitions.
//!
//! Defines the CLI structure for trading-peripheral using `clap`. Every
//! subcommand works on one configuration document: editing sections or
//! single options interactively, deleting overrides, reconciling the
//! document against the built-in defaults, and listing its contents.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::paths;
use crate::application::Theme;
use crate::domain::schema::Limits;

/// Interactive editor and drift checker for trading-peripheral configuration
#[derive(Parser, Debug)]
#[command(name = "trading-peripheral")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration document to operate on
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Settings file for the tool itself
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Document path, falling back to the per-user default.
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(paths::default_document)
    }

    /// Settings path, falling back to the per-user default.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.settings.clone().unwrap_or_else(paths::default_settings)
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Whether to style output, given whether stdout is a terminal.
    #[must_use]
    pub const fn enabled(&self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }

    /// Prompt theme for this choice on the current stdout.
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::new(self.enabled(std::io::stdout().is_terminal()))
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Edit every option of a section (backs up the document first)
    Edit(EditArgs),

    /// Edit a single option
    Option(OptionArgs),

    /// Delete an option from the document
    Delete(DeleteArgs),

    /// Compare the document with the defaults and revert overrides
    Check(CheckArgs),

    /// Show sections, or the options of one section
    Show(ShowArgs),
}

/// Arguments for `edit`.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Section to edit, e.g. "General" or "Actions"
    pub section: String,
}

/// Arguments for `option`.
#[derive(Args, Debug)]
pub struct OptionArgs {
    /// Section holding the option
    pub section: String,

    /// Option to edit
    pub option: String,

    /// Lower bound for numeric values
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<f64>,

    /// Upper bound for numeric values
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<f64>,

    /// Treat bounded values as floats instead of integers
    #[arg(long)]
    pub float: bool,

    /// Value seeded when the option is missing; dropped again on quit if unchanged
    #[arg(long)]
    pub initial: Option<String>,
}

impl OptionArgs {
    /// Numeric limits, when either bound was given.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn limits(&self) -> Option<Limits> {
        if self.min.is_none() && self.max.is_none() {
            return None;
        }
        Some(if self.float {
            Limits::Float {
                min: self.min.unwrap_or(f64::MIN),
                max: self.max.unwrap_or(f64::MAX),
            }
        } else {
            Limits::Int {
                min: self.min.map_or(i64::MIN, |min| min.trunc() as i64),
                max: self.max.map_or(i64::MAX, |max| max.trunc() as i64),
            }
        })
    }
}

/// Arguments for `delete`.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Section holding the option
    pub section: String,

    /// Option to delete
    pub option: String,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// List differences without prompting or backing up
    #[arg(long)]
    pub list: bool,
}

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Section to list; all sections when omitted
    pub section: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "trading-peripheral");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_parse_edit_command() {
        let cli = Cli::try_parse_from(["trading-peripheral", "edit", "General"]).unwrap();
        assert!(matches!(cli.command, Commands::Edit(ref args) if args.section == "General"));
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_section_with_space() {
        let cli = Cli::try_parse_from(["trading-peripheral", "edit", "Order Status"]).unwrap();
        assert!(matches!(cli.command, Commands::Edit(ref args) if args.section == "Order Status"));
    }

    #[test]
    fn test_global_flags_after_command() {
        let cli = Cli::try_parse_from([
            "trading-peripheral",
            "show",
            "--json",
            "-vv",
            "--config",
            "doc.ini",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.document_path(), PathBuf::from("doc.ini"));
    }

    #[test]
    fn test_default_paths_when_flags_missing() {
        let cli = Cli::try_parse_from(["trading-peripheral", "check"]).unwrap();
        assert_eq!(cli.document_path(), paths::default_document());
        assert_eq!(cli.settings_path(), paths::default_settings());
    }

    #[test]
    fn test_option_limits() {
        let cli = Cli::try_parse_from([
            "trading-peripheral",
            "option",
            "General",
            "implicitly_wait",
            "--min",
            "-1",
            "--max",
            "10.9",
        ])
        .unwrap();
        let Commands::Option(args) = cli.command else {
            panic!("expected option command");
        };
        assert_eq!(args.limits(), Some(Limits::Int { min: -1, max: 10 }));
    }

    #[test]
    fn test_option_float_limits_and_initial() {
        let cli = Cli::try_parse_from([
            "trading-peripheral",
            "option",
            "General",
            "delay",
            "--max",
            "2.5",
            "--float",
            "--initial",
            "0.5",
        ])
        .unwrap();
        let Commands::Option(args) = cli.command else {
            panic!("expected option command");
        };
        assert_eq!(
            args.limits(),
            Some(Limits::Float {
                min: f64::MIN,
                max: 2.5
            })
        );
        assert_eq!(args.initial.as_deref(), Some("0.5"));
    }

    #[test]
    fn test_option_without_limits() {
        let cli = Cli::try_parse_from(["trading-peripheral", "option", "General", "headless"]).unwrap();
        let Commands::Option(args) = cli.command else {
            panic!("expected option command");
        };
        assert_eq!(args.limits(), None);
    }

    #[test]
    fn test_check_list_flag() {
        let cli = Cli::try_parse_from(["trading-peripheral", "check", "--list"]).unwrap();
        assert!(matches!(cli.command, Commands::Check(CheckArgs { list: true })));
    }

    #[test]
    fn test_color_choice() {
        assert!(ColorChoice::Auto.enabled(true));
        assert!(!ColorChoice::Auto.enabled(false));
        assert!(ColorChoice::Always.enabled(false));
        assert!(!ColorChoice::Never.enabled(true));
        assert!(!ColorChoice::Never.theme().is_colored());
    }

    #[test]
    fn test_invalid_color_value() {
        let result = Cli::try_parse_from(["trading-peripheral", "--color", "sometimes", "show"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Cli::try_parse_from(["trading-peripheral"]).is_err());
    }

    #[test]
    fn test_delete_requires_option() {
        assert!(Cli::try_parse_from(["trading-peripheral", "delete", "General"]).is_err());
    }
}
