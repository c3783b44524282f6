//! Domain types and validators for drush-alias configuration.
//!
//! Pure functions only: no I/O, no filesystem access.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::alias::{
    DEFAULT_DUMP_DIR, DEFAULT_SSH_OPTIONS, DOC_ROOT_PREFIX, DOC_ROOT_SUFFIX, DerivationOptions,
};
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "application.uuid",
    "alias.path",
    "alias.docroot_prefix",
    "alias.docroot_suffix",
    "alias.ssh_options",
    "alias.dump_dir",
    "api.base_url",
    "api.token_url",
    "api.timeout_secs",
];

pub const DEFAULT_API_BASE_URL: &str = "https://cloud.acquia.com/api";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.acquia.com/api/auth/oauth/token";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // literal pattern
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("valid regex")
});

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.drush-alias/config.yaml`.
///
/// API credentials are never stored here; they come from flags or the
/// environment only.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AliasConfig {
    pub application: ApplicationConfig,
    pub alias: AliasFileConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Application UUID used when `--app` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// Where alias files go and what they contain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AliasFileConfig {
    /// Output directory used when `--alias-path` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub docroot_prefix: String,
    pub docroot_suffix: String,
    pub ssh_options: String,
    pub dump_dir: String,
}

impl Default for AliasFileConfig {
    fn default() -> Self {
        Self {
            path: None,
            docroot_prefix: DOC_ROOT_PREFIX.to_string(),
            docroot_suffix: DOC_ROOT_SUFFIX.to_string(),
            ssh_options: DEFAULT_SSH_OPTIONS.to_string(),
            dump_dir: DEFAULT_DUMP_DIR.to_string(),
        }
    }
}

/// Remote API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub token_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AliasConfig {
    /// Descriptor values for the alias deriver.
    #[must_use]
    pub fn derivation_options(&self) -> DerivationOptions {
        DerivationOptions {
            docroot_prefix: self.alias.docroot_prefix.clone(),
            docroot_suffix: self.alias.docroot_suffix.clone(),
            ssh_options: self.alias.ssh_options.clone(),
            dump_dir: self.alias.dump_dir.clone(),
        }
    }

    /// Current value of a whitelisted key, as shown by `config show`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "application.uuid" => self.application.uuid.clone(),
            "alias.path" => self.alias.path.clone(),
            "alias.docroot_prefix" => Some(self.alias.docroot_prefix.clone()),
            "alias.docroot_suffix" => Some(self.alias.docroot_suffix.clone()),
            "alias.ssh_options" => Some(self.alias.ssh_options.clone()),
            "alias.dump_dir" => Some(self.alias.dump_dir.clone()),
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.token_url" => Some(self.api.token_url.clone()),
            "api.timeout_secs" => Some(self.api.timeout_secs.to_string()),
            _ => None,
        }
    }

    /// Validate and apply `key = value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        let value = value.to_string();
        match key {
            "application.uuid" => self.application.uuid = Some(value),
            "alias.path" => self.alias.path = Some(value),
            "alias.docroot_prefix" => self.alias.docroot_prefix = value,
            "alias.docroot_suffix" => self.alias.docroot_suffix = value,
            "alias.ssh_options" => self.alias.ssh_options = value,
            "alias.dump_dir" => self.alias.dump_dir = value,
            "api.base_url" => self.api.base_url = value.trim_end_matches('/').to_string(),
            "api.token_url" => self.api.token_url = value,
            "api.timeout_secs" => self.api.timeout_secs = value.parse()?,
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Returns `true` for a canonical hyphenated UUID.
#[must_use]
pub fn is_uuid(value: &str) -> bool {
    UUID_RE.is_match(value)
}

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let expected = match key {
        "application.uuid" if !is_uuid(value) => {
            Some("Expected a UUID such as a47ac10b-58cc-4372-a567-0e02b2c3d470")
        }
        "alias.path" if value.trim().is_empty() => Some("Expected a directory path"),
        "alias.docroot_prefix" | "alias.dump_dir" if !value.starts_with('/') => {
            Some("Expected an absolute path")
        }
        "alias.docroot_suffix" if value.trim_matches('/').is_empty() => {
            Some("Expected a non-empty directory name")
        }
        "alias.ssh_options" if value.contains('\n') => Some("Expected a single line"),
        "api.base_url" | "api.token_url"
            if !(value.starts_with("https://") || value.starts_with("http://")) =>
        {
            Some("Expected an http:// or https:// URL")
        }
        "api.timeout_secs" if !value.parse::<u64>().is_ok_and(|secs| secs > 0) => {
            Some("Expected a positive number of seconds")
        }
        _ => None,
    };
    if let Some(expected) = expected {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
