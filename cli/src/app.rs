//! Application context: unified state passed to every command handler.

use crate::infra::config::YamlConfigStore;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags passed from the top-level CLI.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode). Always quiet in JSON
    /// mode so stdout carries nothing but the JSON document.
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Configuration file store.
    pub config_store: YamlConfigStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &OutputFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            config_store: YamlConfigStore::from_env(),
        }
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }
}
