//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::commands;
use crate::domain::error::{AliasError, ConfigError};
use crate::infra::cloud_api::ApiError;

/// Generate Drush site aliases from Acquia Cloud environments
#[derive(Parser)]
#[command(
    name = "drush-alias",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also honoured via `NO_COLOR`)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch environments and write <site>.site.yml alias files
    Generate(commands::generate::GenerateArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            command,
        } = self;
        let app = AppContext::new(&OutputFlags {
            no_color,
            quiet,
            json,
        });
        match command {
            Command::Generate(args) => commands::generate::run(&app, args),
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}

/// Machine-readable code for an error returned by [`Cli::run`].
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<AliasError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<ApiError>() {
            return e.code();
        }
    }
    "internal"
}
