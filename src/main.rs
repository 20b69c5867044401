use clap::Parser;
use tracing::{error, info};

use trading_peripheral::adapter::inbound::cli::command::Cli;
use trading_peripheral::adapter::inbound::cli::output::{self, OutputConfig};
use trading_peripheral::adapter::inbound::cli::{execute, Session};
use trading_peripheral::infrastructure::config::settings::Settings;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let theme = cli.color.theme();
    output::configure(OutputConfig::new(
        cli.json,
        cli.quiet,
        cli.verbose,
        theme.is_colored(),
    ));

    let settings = match Settings::load_or_default(cli.settings_path()) {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&format!("failed to load settings: {e}"));
            std::process::exit(e.exit_code());
        }
    };
    settings.init_logging(cli.verbose);
    info!(version = env!("CARGO_PKG_VERSION"), "trading-peripheral starting");

    let session = Session::new(cli.document_path(), settings, theme);
    if let Err(e) = execute(&cli, &session) {
        error!(error = %e, "command failed");
        session.report(&e);
        std::process::exit(e.exit_code());
    }
}
