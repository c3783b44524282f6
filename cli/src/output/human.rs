//! Human-readable terminal renderer.

use std::path::Path;

use anyhow::Result;

use crate::application::services::alias_generation::GenerationReport;
use crate::domain::config::{AliasConfig, VALID_CONFIG_KEYS};
use crate::domain::site_file::{render_site_file, site_file_name};
use crate::output::OutputContext;

/// Renders results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.info(&format!("drush-alias v{version}"));
    }

    /// Render the outcome of a generation run. Dry runs print every site file.
    ///
    /// # Errors
    ///
    /// Returns an error if a site file cannot be rendered.
    pub fn render_report(&self, report: &GenerationReport) -> Result<()> {
        let app = &report.application;
        self.ctx.blank_line();
        self.ctx
            .kv("Application:", &format!("{} ({})", app.name, app.uuid));
        self.ctx.kv(
            "Hosting:",
            &format!("{} ({})", app.hosting_type, app.hosting_id),
        );
        self.ctx
            .kv("Environments:", &report.environments.to_string());

        if report.dry_run && !self.ctx.quiet {
            for (site_id, aliases) in report.aliases.sites() {
                self.ctx.blank_line();
                let title = site_file_name(site_id).unwrap_or_else(|_| site_id.to_string());
                self.ctx.header(&title);
                for line in render_site_file(aliases)?.lines() {
                    println!("    {line}");
                }
            }
        }

        self.ctx.blank_line();
        let aliases = report.aliases.alias_count();
        let sites = report.aliases.site_count();
        if report.unsupported_hosting.is_some() || report.environments == 0 {
            self.ctx.warn("No aliases generated");
        } else if report.dry_run {
            self.ctx.info(&format!(
                "Dry run: {aliases} alias(es) for {sites} site(s); nothing written"
            ));
        } else if report.failures.is_empty() {
            self.ctx.success(&format!(
                "Wrote {} site file(s) with {aliases} alias(es)",
                report.written.len()
            ));
        } else {
            self.ctx.warn(&format!(
                "Wrote {} of {sites} site file(s); {} failed",
                report.written.len(),
                report.failures.len()
            ));
        }
        Ok(())
    }

    pub fn render_config_set(&self, key: &str, value: &str) {
        self.ctx.success(&format!("Set {key} = {value}"));
    }

    /// Render the effective configuration and where it lives.
    pub fn render_config(&self, config: &AliasConfig, path: &Path) {
        self.ctx.header("Configuration:");
        for key in VALID_CONFIG_KEYS {
            let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
            self.ctx.kv(&format!("{key}:"), &value);
        }
        self.ctx.blank_line();
        self.ctx.kv("Config file:", &path.display().to_string());
        self.ctx
            .kv("Override:", "DRUSH_ALIAS_CONFIG=<path>");
    }
}
