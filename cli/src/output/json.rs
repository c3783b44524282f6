//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed object to
//! stdout: the command result on success, or the error object on failure.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::services::alias_generation::GenerationReport;
use crate::domain::config::{AliasConfig, VALID_CONFIG_KEYS};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders command results as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_report(&self, report: &GenerationReport) -> Result<()> {
        print_pretty(&serde_json::to_value(report).context("serializing report")?)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &AliasConfig, path: &Path) -> Result<()> {
        let values: serde_json::Map<String, serde_json::Value> = VALID_CONFIG_KEYS
            .iter()
            .map(|key| {
                let value = config
                    .get(key)
                    .map_or(serde_json::Value::Null, serde_json::Value::String);
                ((*key).to_string(), value)
            })
            .collect();
        print_pretty(&serde_json::json!({
            "path": path,
            "values": values,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config_set(&self, key: &str, value: &str) -> Result<()> {
        print_pretty(&serde_json::json!({ "key": key, "value": value }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        print_pretty(&serde_json::json!({ "version": version }))
    }
}

fn print_pretty(value: &serde_json::Value) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}
