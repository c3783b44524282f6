//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` shows a spinner on a TTY, otherwise prints `"  → {message}"`
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ⚠ {message}"` (suppressed when `ctx.quiet`)
/// - `error()` prints `"  ✗ {message}"` to stderr (never suppressed)
///
/// A running spinner is settled with a checkmark before any other line is
/// printed, and on drop.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            spinner: RefCell::new(None),
        }
    }

    fn settle(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            progress::finish_ok(&pb);
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.settle();
        if self.ctx.show_progress() {
            *self.spinner.borrow_mut() = Some(progress::spinner(message));
        } else if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.info));
        }
    }

    fn success(&self, message: &str) {
        self.settle();
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        self.settle();
        self.ctx.warn(message);
    }

    fn error(&self, message: &str) {
        self.settle();
        self.ctx.error(message);
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        self.settle();
    }
}
