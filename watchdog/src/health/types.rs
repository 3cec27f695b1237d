//! Evaluation cycle types: collected readings and the resulting decision

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RestartActionError;
use crate::oracle::{Height, OracleKind};

/// One oracle's contribution to a cycle; `height` is `None` when it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleReading {
    pub name: String,
    pub kind: OracleKind,
    pub height: Option<Height>,
}

/// Every configured oracle's reading, in configuration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionResult {
    pub readings: Vec<OracleReading>,
}

impl CollectionResult {
    pub fn new(readings: Vec<OracleReading>) -> Self {
        Self { readings }
    }

    /// Successful network heights, in configuration order
    pub fn network_heights(&self) -> Vec<Height> {
        self.readings
            .iter()
            .filter(|r| r.kind == OracleKind::Network)
            .filter_map(|r| r.height)
            .collect()
    }

    /// The local daemon's height, if it answered
    pub fn local_height(&self) -> Option<Height> {
        self.readings
            .iter()
            .find(|r| r.kind == OracleKind::Local)
            .and_then(|r| r.height)
    }

    /// Number of oracles that answered this cycle
    pub fn responded(&self) -> usize {
        self.readings.iter().filter(|r| r.height.is_some()).count()
    }

    pub fn get(&self, name: &str) -> Option<&OracleReading> {
        self.readings.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Why a cycle could not judge divergence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InconclusiveReason {
    /// The daemon could not be queried
    LocalUnavailable,
    /// No network oracle answered
    NoNetworkReference,
}

impl fmt::Display for InconclusiveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InconclusiveReason::LocalUnavailable => write!(f, "local daemon height unavailable"),
            InconclusiveReason::NoNetworkReference => write!(f, "no network oracle answered"),
        }
    }
}

/// Outcome of one evaluation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Healthy {
        network_estimate: Height,
        local_height: Height,
    },
    RestartRequested {
        network_estimate: Height,
        local_height: Height,
    },
    /// Not enough data; neither healthy nor a reason to restart
    Inconclusive {
        reason: InconclusiveReason,
        network_estimate: Option<Height>,
        local_height: Option<Height>,
    },
}

impl Decision {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Decision::Healthy { .. })
    }

    pub fn requests_restart(&self) -> bool {
        matches!(self, Decision::RestartRequested { .. })
    }

    pub fn is_inconclusive(&self) -> bool {
        matches!(self, Decision::Inconclusive { .. })
    }

    pub fn network_estimate(&self) -> Option<Height> {
        match self {
            Decision::Healthy {
                network_estimate, ..
            }
            | Decision::RestartRequested {
                network_estimate, ..
            } => Some(*network_estimate),
            Decision::Inconclusive {
                network_estimate, ..
            } => *network_estimate,
        }
    }

    pub fn local_height(&self) -> Option<Height> {
        match self {
            Decision::Healthy { local_height, .. }
            | Decision::RestartRequested { local_height, .. } => Some(*local_height),
            Decision::Inconclusive { local_height, .. } => *local_height,
        }
    }

    /// Signed lag of the daemon behind the network estimate, when both are known
    pub fn divergence(&self) -> Option<i128> {
        match (self.network_estimate(), self.local_height()) {
            (Some(network), Some(local)) => Some(network as i128 - local as i128),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Healthy {
                network_estimate,
                local_height,
            } => write!(
                f,
                "healthy (network {}, local {})",
                network_estimate, local_height
            ),
            Decision::RestartRequested {
                network_estimate,
                local_height,
            } => write!(
                f,
                "restart requested (network {}, local {})",
                network_estimate, local_height
            ),
            Decision::Inconclusive { reason, .. } => write!(f, "inconclusive: {}", reason),
        }
    }
}

/// Everything one cycle produced, for logging and callers
#[derive(Debug)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub collection: CollectionResult,
    pub decision: Decision,
    /// Present only when a restart was attempted
    pub restart: Option<Result<(), RestartActionError>>,
}

impl CycleReport {
    pub fn restart_attempted(&self) -> bool {
        self.restart.is_some()
    }

    pub fn restart_succeeded(&self) -> bool {
        matches!(self.restart, Some(Ok(())))
    }
}
