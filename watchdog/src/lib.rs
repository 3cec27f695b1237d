pub mod config;
pub mod constants;
pub mod errors;
pub mod health;
pub mod oracle;
pub mod services;

// Re-export commonly used types
pub use config::{Config, ConfigManager, DaemonConfig, OracleConfig, RestartConfig};
pub use errors::{ConfigError, OracleError, RestartActionError, WatchdogError};
pub use health::{CollectionResult, Decision, DivergenceEvaluator, HealthMonitor, OracleCollector};
pub use oracle::{Height, Oracle, OracleKind};
pub use services::{CommandRestarter, Restarter};
