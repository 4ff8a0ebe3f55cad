//! Config loading and validation.

use super::model::Config;
use crate::error::{ClashError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ClashError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ClashError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // Treat an empty document as all defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ClashError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ClashError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `user_name` must not contain `@` (it delimits user from host in tokens)
    /// - `host_name` must not be empty
    pub fn validate(&self) -> Result<()> {
        if let Some(user) = &self.user_name
            && user.contains('@')
        {
            return Err(ClashError::UserError(format!(
                "config validation failed: user_name must not contain '@' (found '{}')",
                user
            )));
        }

        if let Some(host) = &self.host_name
            && host.is_empty()
        {
            return Err(ClashError::UserError(
                "config validation failed: host_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
