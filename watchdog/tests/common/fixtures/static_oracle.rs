//! In-process oracles with scripted behavior, for collector tests

use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use watchdog::{Height, Oracle, OracleError, OracleKind};

/// What an oracle does when asked for its height
#[derive(Debug, Clone)]
pub enum Behavior {
    Height(Height),
    DelayedHeight(Height, Duration),
    NetworkError,
    ParseError,
    Panic,
}

pub struct StaticOracle {
    name: String,
    kind: OracleKind,
    behavior: Behavior,
    calls: AtomicUsize,
    /// Set once a fetch runs to completion
    completed: Arc<AtomicBool>,
}

impl StaticOracle {
    pub fn network(name: &str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self::with_kind(name, OracleKind::Network, behavior))
    }

    pub fn local(name: &str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self::with_kind(name, OracleKind::Local, behavior))
    }

    fn with_kind(name: &str, kind: OracleKind, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            kind,
            behavior,
            calls: AtomicUsize::new(0),
            completed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }
}

impl Oracle for StaticOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OracleKind {
        self.kind
    }

    fn fetch_height(&self) -> BoxFuture<'_, Result<Height, OracleError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.clone();
        let completed = self.completed.clone();
        Box::pin(async move {
            let result = match behavior {
                Behavior::Height(height) => Ok(height),
                Behavior::DelayedHeight(height, delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(height)
                }
                Behavior::NetworkError => Err(OracleError::network(&self.name, "connection refused")),
                Behavior::ParseError => Err(OracleError::parse(&self.name, "field 'height' not found")),
                Behavior::Panic => panic!("oracle {} blew up", self.name),
            };
            completed.store(true, Ordering::SeqCst);
            result
        })
    }
}

/// Upcast for `OracleCollector::new`
pub fn oracles(list: &[&Arc<StaticOracle>]) -> Vec<Arc<dyn Oracle>> {
    list.iter()
        .map(|o| Arc::clone(*o) as Arc<dyn Oracle>)
        .collect()
}
