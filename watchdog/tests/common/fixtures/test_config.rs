//! Test configuration builder for writing watchdog configs to disk

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for creating test configurations
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    threshold: Option<u64>,
    per_oracle_timeout_seconds: u64,
    overall_deadline_seconds: u64,
    check_interval_seconds: Option<u64>,
    daemon_rpc_url: String,
    service_name: String,
    restart_command: Vec<String>,
    oracles: Vec<OracleEntry>,
}

#[derive(Clone)]
struct OracleEntry {
    name: String,
    url: String,
    height_path: String,
    accept_invalid_certs: bool,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            threshold: Some(2),
            per_oracle_timeout_seconds: 2,
            overall_deadline_seconds: 3,
            check_interval_seconds: None,
            daemon_rpc_url: "http://127.0.0.1:18081/json_rpc".to_string(),
            service_name: "monerod".to_string(),
            restart_command: vec!["true".to_string()],
            oracles: Vec::new(),
        }
    }

    pub fn threshold(mut self, threshold: u64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Leave `threshold` out of the file
    pub fn without_threshold(mut self) -> Self {
        self.threshold = None;
        self
    }

    pub fn timeouts(mut self, per_oracle_seconds: u64, overall_seconds: u64) -> Self {
        self.per_oracle_timeout_seconds = per_oracle_seconds;
        self.overall_deadline_seconds = overall_seconds;
        self
    }

    pub fn check_interval(mut self, seconds: u64) -> Self {
        self.check_interval_seconds = Some(seconds);
        self
    }

    pub fn daemon(mut self, rpc_url: &str) -> Self {
        self.daemon_rpc_url = rpc_url.to_string();
        self
    }

    pub fn service_name(mut self, name: &str) -> Self {
        self.service_name = name.to_string();
        self
    }

    pub fn restart_command(mut self, command: &[&str]) -> Self {
        self.restart_command = command.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn add_oracle(mut self, name: &str, url: &str, height_path: &str) -> Self {
        self.oracles.push(OracleEntry {
            name: name.to_string(),
            url: url.to_string(),
            height_path: height_path.to_string(),
            accept_invalid_certs: false,
        });
        self
    }

    pub fn add_insecure_oracle(mut self, name: &str, url: &str, height_path: &str) -> Self {
        self.oracles.push(OracleEntry {
            name: name.to_string(),
            url: url.to_string(),
            height_path: height_path.to_string(),
            accept_invalid_certs: true,
        });
        self
    }

    fn to_toml(&self) -> String {
        let mut toml = String::new();
        if let Some(threshold) = self.threshold {
            toml.push_str(&format!("threshold = {}\n", threshold));
        }
        toml.push_str(&format!(
            "per_oracle_timeout_seconds = {}\noverall_deadline_seconds = {}\n",
            self.per_oracle_timeout_seconds, self.overall_deadline_seconds
        ));
        if let Some(interval) = self.check_interval_seconds {
            toml.push_str(&format!("check_interval_seconds = {}\n", interval));
        }

        let command: Vec<String> = self
            .restart_command
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect();
        toml.push_str(&format!(
            r#"
[daemon]
rpc_url = "{}"

[restart]
service_name = "{}"
command = [{}]
"#,
            self.daemon_rpc_url,
            self.service_name,
            command.join(", ")
        ));

        for oracle in &self.oracles {
            toml.push_str(&format!(
                r#"
[[oracles]]
name = "{}"
url = "{}"
height_path = "{}"
accept_invalid_certs = {}
"#,
                oracle.name, oracle.url, oracle.height_path, oracle.accept_invalid_certs
            ));
        }

        toml
    }

    /// Write `main.toml` into a temp directory
    pub fn build(self) -> TestConfig {
        let config_path = self.temp_dir.path().join("main.toml");
        fs::write(&config_path, self.to_toml()).expect("Failed to write main.toml");
        TestConfig {
            _temp_dir: self.temp_dir,
            config_path,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Built test configuration with temp directory
pub struct TestConfig {
    _temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestConfig {
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}
