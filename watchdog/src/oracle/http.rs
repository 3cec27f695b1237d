//! Network oracle: plain HTTP GET returning a JSON document

use futures::future::BoxFuture;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::debug;

use super::{Height, HeightPath, Oracle, OracleKind};
use crate::errors::OracleError;

pub struct HttpHeightOracle {
    client: HttpClient,
    name: String,
    url: String,
    height_path: HeightPath,
}

impl HttpHeightOracle {
    pub fn new(client: HttpClient, name: String, url: String, height_path: HeightPath) -> Self {
        Self {
            client,
            name,
            url,
            height_path,
        }
    }

    async fn query(&self) -> Result<Height, OracleError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| map_request_error(&self.name, e))?;

        if !response.status().is_success() {
            return Err(OracleError::network(
                &self.name,
                format!("HTTP {} from {}", response.status(), self.url),
            ));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                OracleError::timeout(&self.name)
            } else {
                OracleError::parse(&self.name, format!("invalid JSON: {}", e))
            }
        })?;

        let height = self
            .height_path
            .extract(&body)
            .map_err(|reason| OracleError::parse(&self.name, reason))?;

        debug!("{} reports height {}", self.name, height);
        Ok(height)
    }
}

impl Oracle for HttpHeightOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OracleKind {
        OracleKind::Network
    }

    fn fetch_height(&self) -> BoxFuture<'_, Result<Height, OracleError>> {
        Box::pin(self.query())
    }
}

/// Client-side timeouts surface as reqwest errors, keep them distinct
pub(crate) fn map_request_error(oracle: &str, error: reqwest::Error) -> OracleError {
    if error.is_timeout() {
        OracleError::timeout(oracle)
    } else {
        OracleError::network(oracle, error)
    }
}
