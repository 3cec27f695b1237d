//! Local oracle: the daemon's JSON-RPC `get_info` call

use futures::future::BoxFuture;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::http::map_request_error;
use super::{height_from_value, Height, Oracle, OracleKind};
use crate::constants::daemon::{GET_INFO_METHOD, JSONRPC_VERSION};
use crate::errors::OracleError;

/// JSON-RPC envelope returned by the daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetInfoResponse {
    #[serde(default)]
    pub id: Value,
    pub result: Option<GetInfoResult>,
    pub error: Option<RpcError>,
}

/// Only `height` is read; the rest of `get_info` is ignored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetInfoResult {
    pub height: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

pub struct DaemonRpcOracle {
    client: HttpClient,
    name: String,
    rpc_url: String,
}

impl DaemonRpcOracle {
    pub fn new(client: HttpClient, name: String, rpc_url: String) -> Self {
        Self {
            client,
            name,
            rpc_url,
        }
    }

    async fn query(&self) -> Result<Height, OracleError> {
        let request_body = serde_json::json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": Uuid::new_v4().to_string(),
            "method": GET_INFO_METHOD
        });

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| map_request_error(&self.name, e))?;

        if !response.status().is_success() {
            return Err(OracleError::network(
                &self.name,
                format!("HTTP {} from {}", response.status(), self.rpc_url),
            ));
        }

        let rpc_response: GetInfoResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                OracleError::timeout(&self.name)
            } else {
                OracleError::parse(&self.name, format!("invalid get_info response: {}", e))
            }
        })?;

        if let Some(error) = rpc_response.error {
            return Err(OracleError::network(
                &self.name,
                format!("RPC error {}: {}", error.code, error.message),
            ));
        }

        let result = rpc_response
            .result
            .ok_or_else(|| OracleError::parse(&self.name, "response has no result"))?;

        let height = height_from_value(&result.height)
            .map_err(|reason| OracleError::parse(&self.name, format!("result.height: {}", reason)))?;

        debug!("{} reports height {}", self.name, height);
        Ok(height)
    }
}

impl Oracle for DaemonRpcOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OracleKind {
        OracleKind::Local
    }

    fn fetch_height(&self) -> BoxFuture<'_, Result<Height, OracleError>> {
        Box::pin(self.query())
    }
}
