//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: HTTP calls to the cloud API,
//! filesystem access, and config persistence.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod cloud_api;
pub mod config;
pub mod fs;
