// File: watchdog/src/health/monitor.rs
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::collector::OracleCollector;
use super::evaluator::DivergenceEvaluator;
use super::types::{CycleReport, Decision};
use crate::config::Config;
use crate::errors::WatchdogError;
use crate::oracle::build_oracles;
use crate::services::{CommandRestarter, Restarter};

/// Runs evaluation cycles: collect, evaluate, restart when the daemon lags.
///
/// Holds no state between cycles.
pub struct HealthMonitor {
    collector: OracleCollector,
    evaluator: DivergenceEvaluator,
    restarter: Arc<dyn Restarter>,
    service_name: String,
}

impl HealthMonitor {
    pub fn new(
        collector: OracleCollector,
        evaluator: DivergenceEvaluator,
        restarter: Arc<dyn Restarter>,
        service_name: String,
    ) -> Self {
        Self {
            collector,
            evaluator,
            restarter,
            service_name,
        }
    }

    /// Wire up oracles, evaluator and the supervisor command from configuration
    pub fn from_config(config: &Config) -> Result<Self, WatchdogError> {
        let oracles = build_oracles(config)?;
        let collector = OracleCollector::new(
            oracles,
            config.per_oracle_timeout(),
            config.overall_deadline(),
        )?;
        let restarter = CommandRestarter::from_config(&config.restart)?;

        Ok(Self::new(
            collector,
            DivergenceEvaluator::new(config.threshold),
            Arc::new(restarter),
            config.restart.service_name.clone(),
        ))
    }

    /// One complete cycle. Oracle and restart failures are logged and folded
    /// into the report, never returned as errors.
    pub async fn run_cycle(&self) -> CycleReport {
        let started_at = Utc::now();
        info!(
            "Started daemon health check ({} oracles)",
            self.collector.oracles().len()
        );

        let collection = self.collector.collect().await;
        let decision = self.evaluator.evaluate(&collection);

        let restart = match decision {
            Decision::Healthy {
                network_estimate,
                local_height,
            } => {
                info!(
                    "All good! Network height {}, {} height {} (threshold {})",
                    network_estimate,
                    self.service_name,
                    local_height,
                    self.evaluator.threshold()
                );
                None
            }
            Decision::RestartRequested {
                network_estimate,
                local_height,
            } => {
                warn!(
                    "{} is {} blocks behind the network ({} < {}), above threshold {}; restarting",
                    self.service_name,
                    network_estimate - local_height,
                    local_height,
                    network_estimate,
                    self.evaluator.threshold()
                );
                let result = self.restarter.restart(&self.service_name).await;
                if let Err(e) = &result {
                    warn!("{}", e);
                }
                Some(result)
            }
            Decision::Inconclusive {
                reason,
                network_estimate,
                local_height,
            } => {
                error!(
                    "Health check inconclusive: {} (network {:?}, local {:?}); no action taken",
                    reason, network_estimate, local_height
                );
                None
            }
        };

        CycleReport {
            started_at,
            finished_at: Utc::now(),
            collection,
            decision,
            restart,
        }
    }
}
