//! Site alias file naming and rendering.
//!
//! Pure functions only; the caller owns the filesystem.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::alias::SiteAliases;

/// Suffix Drush expects on site alias files.
pub const SITE_FILE_SUFFIX: &str = ".site.yml";

/// `<site_id>.site.yml`
///
/// # Errors
///
/// Returns an error if the site ID is empty, is `.` or `..`, or contains a
/// path separator or NUL byte, since the file would land outside the alias
/// directory or not be addressable as `@<site_id>.<env>`.
pub fn site_file_name(site_id: &str) -> Result<String> {
    anyhow::ensure!(!site_id.is_empty(), "site ID is empty");
    anyhow::ensure!(
        site_id != "." && site_id != "..",
        "site ID {site_id:?} is not a valid file name"
    );
    anyhow::ensure!(
        !site_id.contains(['/', '\\', '\0']),
        "site ID {site_id:?} contains a path separator"
    );
    Ok(format!("{site_id}{SITE_FILE_SUFFIX}"))
}

/// Full path of a site's alias file inside `alias_dir`.
///
/// # Errors
///
/// Returns an error if the site ID is not a safe file name.
pub fn site_file_path(alias_dir: &Path, site_id: &str) -> Result<PathBuf> {
    Ok(alias_dir.join(site_file_name(site_id)?))
}

/// Serialize one site's aliases, keyed by environment name.
///
/// # Errors
///
/// Returns an error if YAML serialization fails.
pub fn render_site_file(aliases: &SiteAliases) -> Result<String> {
    serde_yaml::to_string(aliases).context("cannot serialize site aliases")
}

/// Parse a previously rendered site file.
///
/// # Errors
///
/// Returns an error if the content is not a valid alias map.
pub fn parse_site_file(content: &str) -> Result<SiteAliases> {
    serde_yaml::from_str(content).context("cannot parse site aliases")
}
