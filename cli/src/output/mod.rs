//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::alias_generation::GenerationReport;
use crate::domain::config::AliasConfig;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print an empty spacer line. Suppressed when `quiet`.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Output-mode dispatch: one variant per rendering backend.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render the outcome of `drush-alias generate`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_report(&self, report: &GenerationReport) -> Result<()> {
        match self {
            Self::Human(r) => r.render_report(report),
            Self::Json(r) => r.render_report(report),
        }
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &AliasConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Self::Json(r) => r.render_config(config, path),
        }
    }

    /// Render the result of `drush-alias config set`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config_set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config_set(key, value);
                Ok(())
            }
            Self::Json(r) => r.render_config_set(key, value),
        }
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(r) => r.render_version(version),
        }
    }
}
