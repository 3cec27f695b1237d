// File: watchdog/src/services/restart_service.rs
use futures::future::BoxFuture;
use std::time::Duration;
use tokio::process::Command as AsyncCommand;
use tokio::time::timeout;
use tracing::info;

use crate::config::RestartConfig;
use crate::errors::{ConfigError, RestartActionError};

/// Recovery collaborator: restarts a named service, once, with no retry.
pub trait Restarter: Send + Sync {
    fn restart<'a>(&'a self, service_name: &'a str)
        -> BoxFuture<'a, Result<(), RestartActionError>>;
}

/// Restarts a service by running a supervisor command, e.g.
/// `supervisorctl restart <service>`. Exit code 0 is success.
pub struct CommandRestarter {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandRestarter {
    pub fn new(command: &[String], timeout: Duration) -> Result<Self, ConfigError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ConfigError::invalid("restart.command", "must not be empty"))?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    pub fn from_config(config: &RestartConfig) -> Result<Self, ConfigError> {
        Self::new(&config.command, Duration::from_secs(config.timeout_seconds))
    }

    /// The full command line for `service_name`, for logging
    pub fn command_line(&self, service_name: &str) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 2);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.push(service_name);
        parts.join(" ")
    }

    async fn run(&self, service_name: &str) -> Result<(), RestartActionError> {
        let command_line = self.command_line(service_name);
        info!("Running restart command: {}", command_line);

        let mut command = AsyncCommand::new(&self.program);
        command.args(&self.args).arg(service_name).kill_on_drop(true);

        let output = timeout(self.timeout, command.output())
            .await
            .map_err(|_| RestartActionError::Timeout {
                service_name: service_name.to_string(),
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| RestartActionError::SpawnFailed {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(RestartActionError::NonZeroExit {
                service_name: service_name.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("{} successfully restarted", service_name);
        Ok(())
    }
}

impl Restarter for CommandRestarter {
    fn restart<'a>(
        &'a self,
        service_name: &'a str,
    ) -> BoxFuture<'a, Result<(), RestartActionError>> {
        Box::pin(self.run(service_name))
    }
}
