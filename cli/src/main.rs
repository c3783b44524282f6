//! drush-alias - Generate Drush site aliases from Acquia Cloud environments

use std::process::ExitCode;

use clap::Parser;
use drush_alias_cli::cli::{Cli, error_code};
use drush_alias_cli::output::json;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "DRUSH_ALIAS_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json_mode = cli.json;
    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{e:#}");
            match json_mode.then(|| json::format_error(&message, error_code(&e))) {
                Some(Ok(obj)) => println!("{obj}"),
                _ => eprintln!("Error: {message}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("drush_alias_cli=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
