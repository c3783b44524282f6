//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, or `std::net`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Alias derivation errors ───────────────────────────────────────────────────

/// Malformed remote input that stops a derivation run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AliasError {
    #[error("Environment '{environment}' has malformed SSH URL '{ssh_url}': expected exactly one '@' between user and host")]
    MalformedSshUrl {
        environment: String,
        ssh_url: String,
    },

    #[error("Hosting ID '{0}' has no site segment: expected '<realm>:<site>'")]
    InvalidHostingId(String),

    #[error("Environment '{0}' has no domains to use as a site URI")]
    NoDomains(String),

    #[error("Domain '{domain}' in environment '{environment}' yields an empty site ID")]
    EmptySiteId { environment: String, domain: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration input and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Drush alias directory does not exist: {}. Please create the directory.", .0.display())]
    OutputDirMissing(PathBuf),

    #[error("Missing {name}. Pass {flag} or set {env}.")]
    MissingInput {
        name: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}

impl ConfigError {
    /// Stable machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutputDirMissing(_) => "output_dir_missing",
            Self::MissingInput { .. } => "missing_input",
            Self::UnknownKey { .. } => "unknown_config_key",
            Self::InvalidValue { .. } => "invalid_config_value",
        }
    }
}

impl AliasError {
    /// Stable machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        "malformed_input"
    }
}
