//! Infrastructure implementation of the `ConfigStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::AliasConfig;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "DRUSH_ALIAS_CONFIG";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore {
    path: Option<PathBuf>,
}

impl YamlConfigStore {
    /// Store at `$DRUSH_ALIAS_CONFIG`, or `~/.drush-alias/config.yaml`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        }
    }

    /// Store at an explicit path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<AliasConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(AliasConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &AliasConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".drush-alias").join("config.yaml"))
    }
}
