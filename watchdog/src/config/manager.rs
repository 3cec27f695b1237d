use super::Config;
use crate::errors::ConfigError;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    /// Load and validate the configuration file at `config_path`
    pub async fn new(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load_configuration(config_path.as_ref()).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(config_path)
            .await
            .map_err(|e| ConfigError::LoadFailed {
                path: config_path.display().to_string(),
                reason: e.to_string(),
            })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            reason: e.to_string(),
        })?;

        config.validate()?;

        info!(
            "Loaded configuration from {}: threshold {} blocks, {} network oracles, restart target '{}'",
            config_path.display(),
            config.threshold,
            config.oracles.len(),
            config.restart.service_name
        );

        Ok(config)
    }
}
