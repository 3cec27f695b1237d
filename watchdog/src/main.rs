// File: watchdog/src/main.rs
use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use watchdog::constants::runtime;
use watchdog::{ConfigManager, HealthMonitor};

#[tokio::main]
async fn main() -> Result<()> {
    let mut env_filter = EnvFilter::from_default_env();
    for directive in runtime::LOG_DIRECTIVES {
        env_filter = env_filter.add_directive(directive.parse()?);
    }
    fmt().with_env_filter(env_filter).init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(runtime::CONFIG_PATH_ENV).ok())
        .unwrap_or_else(|| runtime::DEFAULT_CONFIG_PATH.to_string());

    let config_manager = ConfigManager::new(&config_path).await?;
    let config = config_manager.get_current_config();

    let monitor = HealthMonitor::from_config(&config)?;

    let Some(check_interval) = config.check_interval() else {
        monitor.run_cycle().await;
        return Ok(());
    };

    info!(
        "Running health checks every {}s",
        check_interval.as_secs()
    );
    let mut interval = tokio::time::interval(check_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut check_count = 0u64;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                check_count += 1;
                let report = monitor.run_cycle().await;
                if check_count.is_multiple_of(10) {
                    info!(
                        "Health check cycle #{} finished: {}",
                        check_count, report.decision
                    );
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, stopping after {} cycles", check_count);
                return Ok(());
            }
        }
    }
}
