//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod alias;
pub mod config;
pub mod error;
pub mod site_file;

pub use alias::{
    AliasBundle, AliasKey, ApplicationMetadata, ConnectionDescriptor, DerivationOptions,
    Derivation, Environment, HostingType, SiteAliases, derive,
};
pub use config::{AliasConfig, validate_config_key, validate_config_value};
pub use error::{AliasError, ConfigError};
