//! Custom error types for the watchdog
//!
//! Provides structured error handling for each layer of an evaluation cycle:
//! oracle collection, configuration and the restart action.

use std::fmt;

/// Main error type for the watchdog
#[derive(Debug)]
pub enum WatchdogError {
    /// Configuration-related errors
    Config(ConfigError),

    /// A single oracle failed to report a height
    Oracle(OracleError),

    /// The restart command failed
    Restart(RestartActionError),

    /// Other errors with context
    Other(String),
}

/// Failure of one oracle for one cycle. Carries no retry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// Connection failure or non-success HTTP status
    Network { oracle: String, reason: String },

    /// Response body could not be turned into a height
    Parse { oracle: String, reason: String },

    /// No answer within the per-oracle timeout
    Timeout { oracle: String },
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

/// Restart action error variants
#[derive(Debug)]
pub enum RestartActionError {
    /// The supervisor command could not be started
    SpawnFailed { command: String, reason: String },

    /// The supervisor command exited unsuccessfully
    NonZeroExit {
        service_name: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The supervisor command did not finish in time
    Timeout { service_name: String, seconds: u64 },
}

impl OracleError {
    /// Name of the oracle that failed
    pub fn oracle(&self) -> &str {
        match self {
            OracleError::Network { oracle, .. }
            | OracleError::Parse { oracle, .. }
            | OracleError::Timeout { oracle } => oracle,
        }
    }

    pub fn network(oracle: &str, reason: impl fmt::Display) -> Self {
        OracleError::Network {
            oracle: oracle.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(oracle: &str, reason: impl fmt::Display) -> Self {
        OracleError::Parse {
            oracle: oracle.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn timeout(oracle: &str) -> Self {
        OracleError::Timeout {
            oracle: oracle.to_string(),
        }
    }
}

impl ConfigError {
    pub fn invalid(field: &str, reason: impl fmt::Display) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for WatchdogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchdogError::Config(e) => write!(f, "Configuration error: {}", e),
            WatchdogError::Oracle(e) => write!(f, "Oracle error: {}", e),
            WatchdogError::Restart(e) => write!(f, "Restart error: {}", e),
            WatchdogError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleError::Network { oracle, reason } => {
                write!(f, "Network error from '{}': {}", oracle, reason)
            }
            OracleError::Parse { oracle, reason } => {
                write!(f, "Unparseable response from '{}': {}", oracle, reason)
            }
            OracleError::Timeout { oracle } => {
                write!(f, "Oracle '{}' timed out", oracle)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required field: {}", field)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl fmt::Display for RestartActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartActionError::SpawnFailed { command, reason } => {
                write!(f, "Failed to run '{}': {}", command, reason)
            }
            RestartActionError::NonZeroExit {
                service_name,
                code,
                stderr,
            } => {
                let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                if stderr.is_empty() {
                    write!(f, "Restart of '{}' failed with return code {}", service_name, code)
                } else {
                    write!(
                        f,
                        "Restart of '{}' failed with return code {}: {}",
                        service_name, code, stderr
                    )
                }
            }
            RestartActionError::Timeout {
                service_name,
                seconds,
            } => {
                write!(f, "Restart of '{}' did not finish within {}s", service_name, seconds)
            }
        }
    }
}

impl std::error::Error for WatchdogError {}
impl std::error::Error for OracleError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for RestartActionError {}

impl From<anyhow::Error> for WatchdogError {
    fn from(err: anyhow::Error) -> Self {
        WatchdogError::Other(err.to_string())
    }
}

impl From<ConfigError> for WatchdogError {
    fn from(err: ConfigError) -> Self {
        WatchdogError::Config(err)
    }
}

impl From<OracleError> for WatchdogError {
    fn from(err: OracleError) -> Self {
        WatchdogError::Oracle(err)
    }
}

impl From<RestartActionError> for WatchdogError {
    fn from(err: RestartActionError) -> Self {
        WatchdogError::Restart(err)
    }
}
