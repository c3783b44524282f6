//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`. Every port is synchronous.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::{AliasConfig, ApplicationMetadata, Environment};

// ── Remote API Port ───────────────────────────────────────────────────────────

/// Read-only access to the cloud management API.
pub trait CloudApi {
    /// Fetch an application's hosting metadata by UUID.
    fn application(&self, uuid: &str) -> Result<ApplicationMetadata>;
    /// Fetch every environment of an application, in API order.
    fn environments(&self, application_uuid: &str) -> Result<Vec<Environment>>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// The filesystem operations the alias writer needs.
pub trait AliasFileSystem {
    /// Returns `true` if `path` exists and is a directory.
    fn dir_exists(&self, path: &Path) -> bool;
    /// Replace the file at `path` with `content`.
    ///
    /// Implementations should write atomically (temp file + rename) so a
    /// failed write never leaves a truncated alias file behind.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save).
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    fn load(&self) -> Result<AliasConfig>;
    /// Persist the configuration.
    fn save(&self, config: &AliasConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a non-fatal error. Processing continues after this call.
    fn error(&self, message: &str);
}
