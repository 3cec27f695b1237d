// File: watchdog/src/config/mod.rs
pub mod manager;
use crate::constants::{daemon, restart, timing};
use crate::errors::ConfigError;
use crate::oracle::HeightPath;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
pub use manager::ConfigManager;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Largest tolerated lag in blocks; required so the trigger point is always explicit
    pub threshold: u64,
    #[serde(default = "default_per_oracle_timeout")]
    pub per_oracle_timeout_seconds: u64,
    #[serde(default = "default_overall_deadline")]
    pub overall_deadline_seconds: u64,
    /// When set, the binary repeats independent cycles at this interval
    pub check_interval_seconds: Option<u64>,
    pub daemon: DaemonConfig,
    pub restart: RestartConfig,
    /// Network oracles, in evaluation order
    #[serde(default)]
    pub oracles: Vec<OracleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default = "default_daemon_name")]
    pub name: String,
    pub rpc_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestartConfig {
    pub service_name: String,
    #[serde(default = "default_restart_command")]
    pub command: Vec<String>,
    #[serde(default = "default_restart_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    pub name: String,
    pub url: String,
    /// Dotted path to the height inside the JSON body, e.g. `data.height`
    pub height_path: String,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_per_oracle_timeout() -> u64 {
    timing::PER_ORACLE_TIMEOUT_SECONDS
}

fn default_overall_deadline() -> u64 {
    timing::OVERALL_DEADLINE_SECONDS
}

fn default_daemon_name() -> String {
    daemon::DEFAULT_NAME.to_string()
}

fn default_restart_command() -> Vec<String> {
    restart::DEFAULT_COMMAND.iter().map(|s| s.to_string()).collect()
}

fn default_restart_timeout() -> u64 {
    restart::DEFAULT_TIMEOUT_SECONDS
}

impl Config {
    pub fn per_oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.per_oracle_timeout_seconds)
    }

    pub fn overall_deadline(&self) -> Duration {
        Duration::from_secs(self.overall_deadline_seconds)
    }

    pub fn check_interval(&self) -> Option<Duration> {
        self.check_interval_seconds.map(Duration::from_secs)
    }

    /// Check the invariants the collector and restart service rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_oracle_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "per_oracle_timeout_seconds",
                "must be greater than zero",
            ));
        }
        if self.per_oracle_timeout_seconds > self.overall_deadline_seconds {
            return Err(ConfigError::invalid(
                "per_oracle_timeout_seconds",
                format!(
                    "{}s exceeds overall_deadline_seconds ({}s)",
                    self.per_oracle_timeout_seconds, self.overall_deadline_seconds
                ),
            ));
        }
        if self.check_interval_seconds == Some(0) {
            return Err(ConfigError::invalid(
                "check_interval_seconds",
                "must be greater than zero",
            ));
        }

        if self.oracles.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "oracles".to_string(),
            });
        }

        if self.daemon.name.trim().is_empty() {
            return Err(ConfigError::invalid("daemon.name", "must not be empty"));
        }
        if self.daemon.rpc_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "daemon.rpc_url".to_string(),
            });
        }

        let mut names = HashSet::new();
        names.insert(self.daemon.name.as_str());
        for oracle in &self.oracles {
            if oracle.name.trim().is_empty() {
                return Err(ConfigError::invalid("oracles.name", "must not be empty"));
            }
            if !names.insert(oracle.name.as_str()) {
                return Err(ConfigError::invalid(
                    "oracles.name",
                    format!("duplicate oracle name '{}'", oracle.name),
                ));
            }
            if oracle.url.trim().is_empty() {
                return Err(ConfigError::MissingRequired {
                    field: format!("oracles.{}.url", oracle.name),
                });
            }
            HeightPath::parse(&oracle.height_path).map_err(|reason| {
                ConfigError::invalid(&format!("oracles.{}.height_path", oracle.name), reason)
            })?;
        }

        if self.restart.service_name.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "restart.service_name".to_string(),
            });
        }
        if self.restart.command.is_empty() {
            return Err(ConfigError::invalid("restart.command", "must not be empty"));
        }
        if self.restart.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "restart.timeout_seconds",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}
