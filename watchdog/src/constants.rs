//! Central repository for defaults and fixed protocol values
//!
//! Organized by category so timeouts, restart defaults and wire constants have
//! a single source of truth.

/// Collection timing defaults (seconds)
pub mod timing {
    /// Default per-oracle fetch timeout
    pub const PER_ORACLE_TIMEOUT_SECONDS: u64 = 10;

    /// Default overall collection deadline
    pub const OVERALL_DEADLINE_SECONDS: u64 = 15;
}

/// Restart action defaults
pub mod restart {
    /// Supervisor command; the service name is appended as the last argument
    pub const DEFAULT_COMMAND: &[&str] = &["supervisorctl", "restart"];

    /// Upper bound on how long the supervisor command may run
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;
}

/// Local daemon JSON-RPC protocol values
pub mod daemon {
    /// Default oracle name for the local daemon
    pub const DEFAULT_NAME: &str = "daemon";

    pub const JSONRPC_VERSION: &str = "2.0";

    /// Method returning the daemon's chain info, including `height`
    pub const GET_INFO_METHOD: &str = "get_info";
}

/// Process-level defaults
pub mod runtime {
    /// Config file used when neither argument nor env var is given
    pub const DEFAULT_CONFIG_PATH: &str = "config/main.toml";

    /// Environment variable overriding the config path
    pub const CONFIG_PATH_ENV: &str = "WATCHDOG_CONFIG";

    /// Log directives applied on top of `RUST_LOG`
    pub const LOG_DIRECTIVES: &[&str] = &["watchdog=info", "reqwest=warn", "hyper=warn"];
}
