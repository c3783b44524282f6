//! `drush-alias config`: show and set configuration values.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (e.g. alias.path)
        key: String,
        /// Configuration value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, validated or saved.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path()?;
    app.renderer().render_config(&config, &path)?;
    Ok(ExitCode::SUCCESS)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    let config = config_service::set_value(&app.config_store, key, value)?;
    let stored = config.get(key).unwrap_or_default();
    app.renderer().render_config_set(key, &stored)?;
    Ok(ExitCode::SUCCESS)
}
