//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::AliasConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the configuration file exists but cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<AliasConfig> {
    store.load()
}

/// Save configuration.
///
/// # Errors
///
/// Returns an error if the configuration cannot be written.
pub fn save_config(store: &impl ConfigStore, config: &AliasConfig) -> Result<()> {
    store.save(config)
}

/// Validate `key = value`, apply it to the stored configuration and save.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or persistence fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<AliasConfig> {
    let mut config = load_config(store)?;
    config.set(key, value)?;
    save_config(store, &config)?;
    Ok(config)
}
