//! Application service: resolve an application, list its environments,
//! derive Drush site aliases and write one file per site.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

use crate::application::ports::{AliasFileSystem, CloudApi, ProgressReporter};
use crate::domain::alias::{
    AliasBundle, AliasKey, ApplicationMetadata, Derivation, DerivationOptions, SiteAliases, derive,
};
use crate::domain::error::ConfigError;
use crate::domain::site_file::{render_site_file, site_file_path};

/// Inputs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    pub application_uuid: &'a str,
    pub alias_dir: &'a Path,
    /// Derive only; never touch the filesystem.
    pub dry_run: bool,
}

/// A site whose alias file could not be written.
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[error("cannot write aliases for site '{site_id}': {message}")]
pub struct SiteWriteFailure {
    pub site_id: String,
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Per-site outcome of writing a bundle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<SiteWriteFailure>,
}

/// Everything a generation run produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub application: ApplicationMetadata,
    pub environments: usize,
    pub dry_run: bool,
    pub aliases: AliasBundle,
    pub overwritten: Vec<AliasKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsupported_hosting: Option<String>,
    pub written: Vec<PathBuf>,
    pub failures: Vec<SiteWriteFailure>,
}

impl GenerationReport {
    fn new(application: ApplicationMetadata, environments: usize, dry_run: bool) -> Self {
        Self {
            application,
            environments,
            dry_run,
            aliases: AliasBundle::new(),
            overwritten: Vec::new(),
            unsupported_hosting: None,
            written: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Run the whole pipeline: resolve → list → derive → write.
///
/// Derivation and writing are skipped when the application has no
/// environments. Per-site write failures are reported and collected in the
/// returned report; they do not fail the run.
///
/// # Errors
///
/// Returns an error if either API call fails, an environment is malformed,
/// or the alias directory does not exist.
pub fn generate_aliases(
    api: &impl CloudApi,
    fs: &impl AliasFileSystem,
    reporter: &impl ProgressReporter,
    request: &GenerateRequest<'_>,
    options: &DerivationOptions,
) -> Result<GenerationReport> {
    reporter.step(&format!(
        "Resolving application {}...",
        request.application_uuid
    ));
    let application = api
        .application(request.application_uuid)
        .with_context(|| format!("cannot fetch application {}", request.application_uuid))?;
    tracing::debug!(
        uuid = %application.uuid,
        hosting_type = %application.hosting_type,
        hosting_id = %application.hosting_id,
        "resolved application"
    );

    reporter.step(&format!("Listing environments of {}...", application.name));
    let environments = api
        .environments(&application.uuid)
        .with_context(|| format!("cannot list environments of {}", application.uuid))?;
    tracing::debug!(count = environments.len(), "listed environments");

    let mut report = GenerationReport::new(application, environments.len(), request.dry_run);
    if environments.is_empty() {
        reporter.warn("Application has no environments; no alias files written");
        return Ok(report);
    }

    match derive(&report.application, &environments, options)? {
        Derivation::UnsupportedHosting {
            hosting_type,
            environments,
        } => {
            reporter.warn(&format!(
                "Unsupported hosting model '{hosting_type}': skipped {environments} environment(s)"
            ));
            report.unsupported_hosting = Some(hosting_type);
        }
        Derivation::Aliases {
            bundle,
            overwritten,
        } => {
            for key in &overwritten {
                reporter.warn(&format!(
                    "Several domains map to @{}.{}; keeping the last one",
                    key.site_id, key.environment
                ));
            }
            if !request.dry_run {
                let written = write_bundle(fs, reporter, &bundle, request.alias_dir)?;
                report.written = written.written;
                report.failures = written.failures;
            }
            report.aliases = bundle;
            report.overwritten = overwritten;
        }
    }

    Ok(report)
}

/// Write one `<site>.site.yml` per site in `bundle` into `alias_dir`.
///
/// Existing files are replaced. The directory is never created.
///
/// # Errors
///
/// Returns [`ConfigError::OutputDirMissing`] before any write if `alias_dir`
/// does not exist. Failures for individual sites are not errors; they are
/// reported and returned in [`WriteReport::failures`].
pub fn write_bundle(
    fs: &impl AliasFileSystem,
    reporter: &impl ProgressReporter,
    bundle: &AliasBundle,
    alias_dir: &Path,
) -> Result<WriteReport> {
    if !fs.dir_exists(alias_dir) {
        return Err(ConfigError::OutputDirMissing(alias_dir.to_path_buf()).into());
    }

    let mut report = WriteReport::default();
    for (site_id, aliases) in bundle.sites() {
        match write_site(fs, alias_dir, site_id, aliases) {
            Ok(path) => {
                reporter.success(&format!("Wrote {}", path.display()));
                report.written.push(path);
            }
            Err(failure) => {
                tracing::debug!(site_id, error = %failure.message, "site alias write failed");
                reporter.error(&failure.to_string());
                report.failures.push(failure);
            }
        }
    }
    Ok(report)
}

fn write_site(
    fs: &impl AliasFileSystem,
    alias_dir: &Path,
    site_id: &str,
    aliases: &SiteAliases,
) -> Result<PathBuf, SiteWriteFailure> {
    let failure = |path: Option<&Path>, err: &anyhow::Error| SiteWriteFailure {
        site_id: site_id.to_string(),
        path: path.map(Path::to_path_buf),
        message: format!("{err:#}"),
    };

    let path = site_file_path(alias_dir, site_id).map_err(|e| failure(None, &e))?;
    let content = render_site_file(aliases).map_err(|e| failure(Some(&path), &e))?;
    fs.write(&path, &content)
        .map_err(|e| failure(Some(&path), &e))?;
    Ok(path)
}
