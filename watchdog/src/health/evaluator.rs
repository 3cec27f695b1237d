//! Divergence evaluation
//!
//! Turns a complete [`CollectionResult`] into a [`Decision`]. The network tip
//! is estimated as the maximum of the heights that were actually reported: a
//! lagging explorer can only under-report, so the maximum is the best lower
//! bound on the true tip and needs no quorum. Failed oracles are absent, never
//! counted as height zero.

use super::types::{CollectionResult, Decision, InconclusiveReason};
use crate::oracle::Height;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivergenceEvaluator {
    threshold: Height,
}

impl DivergenceEvaluator {
    pub fn new(threshold: Height) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Height {
        self.threshold
    }

    /// Pure function of `collection` and the threshold
    pub fn evaluate(&self, collection: &CollectionResult) -> Decision {
        let network_estimate = collection.network_heights().into_iter().max();
        let local_height = collection.local_height();

        let Some(local) = local_height else {
            return Decision::Inconclusive {
                reason: InconclusiveReason::LocalUnavailable,
                network_estimate,
                local_height,
            };
        };

        let Some(network) = network_estimate else {
            return Decision::Inconclusive {
                reason: InconclusiveReason::NoNetworkReference,
                network_estimate,
                local_height,
            };
        };

        // Local ahead of every oracle saturates to zero lag
        let lag = network.saturating_sub(local);
        if lag > self.threshold {
            Decision::RestartRequested {
                network_estimate: network,
                local_height: local,
            }
        } else {
            Decision::Healthy {
                network_estimate: network,
                local_height: local,
            }
        }
    }
}
