//! Height oracles
//!
//! An oracle is anything that can report a claimed chain height. Network
//! oracles are public explorers reached over plain HTTP GET, the local oracle
//! is the daemon's own JSON-RPC endpoint.

mod daemon;
mod http;

pub use daemon::DaemonRpcOracle;
pub use http::HttpHeightOracle;

use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::OracleError;

/// Blockchain block count
pub type Height = u64;

/// Role an oracle plays in the divergence decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OracleKind {
    /// Independent reference for the network tip
    Network,
    /// The daemon under observation
    Local,
}

/// A named source of a claimed chain height.
///
/// Implementations hold no mutable state; every call is an independent query.
pub trait Oracle: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> OracleKind;

    fn fetch_height(&self) -> BoxFuture<'_, Result<Height, OracleError>>;
}

/// Dotted path selecting the height field in a JSON document, e.g. `data.height`.
///
/// Segments that parse as integers also index into arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightPath {
    segments: Vec<String>,
}

impl HeightPath {
    pub fn parse(path: &str) -> Result<Self, String> {
        let path = path.trim();
        if path.is_empty() {
            return Err("height path must not be empty".to_string());
        }

        let segments: Vec<String> = path.split('.').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(format!("height path '{}' contains an empty segment", path));
        }

        Ok(Self { segments })
    }

    /// Walk `document` along the path and read the height found there
    pub fn extract(&self, document: &Value) -> Result<Height, String> {
        let mut current = document;
        for segment in &self.segments {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            current = next.ok_or_else(|| format!("field '{}' not found", self))?;
        }

        height_from_value(current).map_err(|reason| format!("field '{}': {}", self, reason))
    }
}

impl fmt::Display for HeightPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Heights arrive either as JSON integers or as decimal strings
pub(crate) fn height_from_value(value: &Value) -> Result<Height, String> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("{} is not a non-negative integer", n)),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid height '{}': {}", s, e)),
        other => Err(format!("expected an integer, got {}", other)),
    }
}

/// Build the oracle set from configuration: network oracles in declaration
/// order, then the local daemon.
pub fn build_oracles(config: &Config) -> Result<Vec<Arc<dyn Oracle>>> {
    let timeout = config.per_oracle_timeout();
    let verifying = HttpClient::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;
    let mut insecure: Option<HttpClient> = None;

    let mut oracles: Vec<Arc<dyn Oracle>> = Vec::with_capacity(config.oracles.len() + 1);
    for oracle_config in &config.oracles {
        let height_path = HeightPath::parse(&oracle_config.height_path)
            .map_err(|e| anyhow!("Oracle '{}': {}", oracle_config.name, e))?;

        let client = if oracle_config.accept_invalid_certs {
            match &insecure {
                Some(client) => client.clone(),
                None => {
                    let client = HttpClient::builder()
                        .timeout(timeout)
                        .danger_accept_invalid_certs(true)
                        .build()
                        .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;
                    insecure = Some(client.clone());
                    client
                }
            }
        } else {
            verifying.clone()
        };

        oracles.push(Arc::new(HttpHeightOracle::new(
            client,
            oracle_config.name.clone(),
            oracle_config.url.clone(),
            height_path,
        )));
    }

    oracles.push(Arc::new(DaemonRpcOracle::new(
        verifying,
        config.daemon.name.clone(),
        config.daemon.rpc_url.clone(),
    )));

    Ok(oracles)
}
