//! Integration tests for drush-alias CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! None of them reach a real cloud API.

mod config_command;
