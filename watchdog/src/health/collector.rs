//! Concurrent height collection
//!
//! One tokio task per oracle, each bounded by the per-oracle timeout. The join
//! is bounded by the overall deadline: whatever has not answered by then is
//! aborted and recorded as missing. Each task's `JoinHandle` is its own result
//! slot, merged in configuration order once the join finishes.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, error, warn};

use super::types::{CollectionResult, OracleReading};
use crate::errors::{ConfigError, OracleError};
use crate::oracle::{Height, Oracle, OracleKind};

pub struct OracleCollector {
    oracles: Vec<Arc<dyn Oracle>>,
    per_oracle_timeout: Duration,
    overall_deadline: Duration,
}

impl OracleCollector {
    /// Requires at least one network oracle, exactly one local oracle and a
    /// per-oracle timeout that fits inside the overall deadline.
    pub fn new(
        oracles: Vec<Arc<dyn Oracle>>,
        per_oracle_timeout: Duration,
        overall_deadline: Duration,
    ) -> Result<Self, ConfigError> {
        let local = oracles
            .iter()
            .filter(|o| o.kind() == OracleKind::Local)
            .count();
        if local != 1 {
            return Err(ConfigError::invalid(
                "oracles",
                format!("expected exactly one local oracle, found {}", local),
            ));
        }
        if oracles.len() == local {
            return Err(ConfigError::MissingRequired {
                field: "oracles".to_string(),
            });
        }
        if per_oracle_timeout.is_zero() {
            return Err(ConfigError::invalid(
                "per_oracle_timeout",
                "must be greater than zero",
            ));
        }
        if per_oracle_timeout > overall_deadline {
            return Err(ConfigError::invalid(
                "per_oracle_timeout",
                format!(
                    "{:?} exceeds the overall deadline of {:?}",
                    per_oracle_timeout, overall_deadline
                ),
            ));
        }

        Ok(Self {
            oracles,
            per_oracle_timeout,
            overall_deadline,
        })
    }

    pub fn oracles(&self) -> &[Arc<dyn Oracle>] {
        &self.oracles
    }

    /// Query every oracle concurrently. Never fails: a broken, slow or
    /// panicking oracle only leaves its own slot empty.
    pub async fn collect(&self) -> CollectionResult {
        let deadline = Instant::now() + self.overall_deadline;

        let tasks: Vec<_> = self
            .oracles
            .iter()
            .map(|oracle| {
                let oracle = Arc::clone(oracle);
                let per_oracle_timeout = self.per_oracle_timeout;
                tokio::spawn(async move {
                    match timeout(per_oracle_timeout, oracle.fetch_height()).await {
                        Ok(result) => result,
                        Err(_) => Err(OracleError::timeout(oracle.name())),
                    }
                })
            })
            .collect();

        let mut readings = Vec::with_capacity(tasks.len());
        for (oracle, mut task) in self.oracles.iter().zip(tasks) {
            let outcome = timeout_at(deadline, &mut task).await;
            let height: Option<Height> = match outcome {
                Ok(Ok(Ok(height))) => Some(height),
                Ok(Ok(Err(e))) => {
                    warn!("{}", e);
                    None
                }
                Ok(Err(join_error)) => {
                    error!("Oracle task for {} failed: {}", oracle.name(), join_error);
                    None
                }
                Err(_) => {
                    task.abort();
                    warn!(
                        "{} did not answer within the {:?} collection deadline",
                        oracle.name(),
                        self.overall_deadline
                    );
                    None
                }
            };

            readings.push(OracleReading {
                name: oracle.name().to_string(),
                kind: oracle.kind(),
                height,
            });
        }

        let collection = CollectionResult::new(readings);
        debug!(
            "Got {} network heights from {} network oracles",
            collection.network_heights().len(),
            collection.len() - 1
        );
        collection
    }
}
