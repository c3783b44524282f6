//! `drush-alias generate`: write Drush site aliases for one application.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::alias_generation::{GenerateRequest, generate_aliases};
use crate::application::services::config_service;
use crate::domain::config::{AliasConfig, validate_config_value};
use crate::domain::error::ConfigError;
use crate::infra::cloud_api::{AcquiaCloudClient, Credentials};
use crate::infra::fs::LocalFs;
use crate::output::TerminalReporter;

/// Arguments for the generate command.
#[derive(Args, Default)]
pub struct GenerateArgs {
    /// Cloud API key
    #[arg(long, env = "DRUSH_ALIAS_API_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Cloud API secret
    #[arg(long, env = "DRUSH_ALIAS_API_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Application UUID
    #[arg(long = "app", env = "DRUSH_ALIAS_APP_UUID")]
    pub app: Option<String>,

    /// Directory that receives the <site>.site.yml files
    #[arg(long, env = "DRUSH_ALIAS_PATH")]
    pub alias_path: Option<PathBuf>,

    /// Print the aliases without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

/// Inputs for one run after flags, environment and config file are merged.
#[derive(Debug)]
pub struct ResolvedInputs {
    pub credentials: Credentials,
    pub application_uuid: String,
    pub alias_dir: PathBuf,
}

/// Run the generate command.
///
/// # Errors
///
/// Returns an error if an input is missing or invalid, the API call fails,
/// an environment is malformed, or the alias directory does not exist.
pub fn run(app: &AppContext, args: GenerateArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let dry_run = args.dry_run;
    let inputs = resolve_inputs(args.into(), &config, dry_run)?;

    let client = AcquiaCloudClient::new(&config.api, inputs.credentials);
    let reporter = TerminalReporter::new(&app.output);
    let request = GenerateRequest {
        application_uuid: &inputs.application_uuid,
        alias_dir: &inputs.alias_dir,
        dry_run,
    };
    let report = generate_aliases(
        &client,
        &LocalFs,
        &reporter,
        &request,
        &config.derivation_options(),
    )?;
    drop(reporter);

    app.renderer().render_report(&report)?;
    Ok(ExitCode::SUCCESS)
}

/// Values taken from flags or the environment, before config-file fallback.
#[derive(Debug, Default)]
pub struct ProvidedInputs {
    pub key: Option<String>,
    pub secret: Option<String>,
    pub app: Option<String>,
    pub alias_path: Option<PathBuf>,
}

impl From<GenerateArgs> for ProvidedInputs {
    fn from(args: GenerateArgs) -> Self {
        Self {
            key: args.key,
            secret: args.secret,
            app: args.app,
            alias_path: args.alias_path,
        }
    }
}

/// Merge provided inputs with the config file and check every required value.
///
/// Credentials have no config-file fallback. The alias directory is optional
/// for a dry run.
///
/// # Errors
///
/// Returns [`ConfigError::MissingInput`] for an absent value and
/// [`ConfigError::InvalidValue`] for a malformed application UUID.
pub fn resolve_inputs(
    provided: ProvidedInputs,
    config: &AliasConfig,
    dry_run: bool,
) -> Result<ResolvedInputs> {
    let key = non_empty(provided.key).ok_or(ConfigError::MissingInput {
        name: "API key",
        flag: "--key",
        env: "DRUSH_ALIAS_API_KEY",
    })?;
    let secret = non_empty(provided.secret).ok_or(ConfigError::MissingInput {
        name: "API secret",
        flag: "--secret",
        env: "DRUSH_ALIAS_API_SECRET",
    })?;

    let application_uuid = non_empty(provided.app)
        .or_else(|| config.application.uuid.clone())
        .ok_or(ConfigError::MissingInput {
            name: "application UUID",
            flag: "--app",
            env: "DRUSH_ALIAS_APP_UUID",
        })?;
    validate_config_value("application.uuid", &application_uuid)?;

    let alias_dir = provided
        .alias_path
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| config.alias.path.as_deref().map(PathBuf::from));
    let alias_dir = match alias_dir {
        Some(dir) => expand_home(&dir),
        None if dry_run => PathBuf::new(),
        None => {
            return Err(ConfigError::MissingInput {
                name: "Drush alias directory",
                flag: "--alias-path",
                env: "DRUSH_ALIAS_PATH",
            }
            .into());
        }
    };

    Ok(ResolvedInputs {
        credentials: Credentials { key, secret },
        application_uuid,
        alias_dir,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest)),
        Err(_) => path.to_path_buf(),
    }
}
