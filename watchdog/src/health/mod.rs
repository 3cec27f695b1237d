//! Health monitoring module
//!
//! This module provides one evaluation cycle: concurrent height collection,
//! divergence evaluation and the restart decision.

pub mod collector;
pub mod evaluator;
pub mod monitor;
pub mod types;

pub use collector::OracleCollector;
pub use evaluator::DivergenceEvaluator;
pub use monitor::HealthMonitor;
pub use types::{CollectionResult, CycleReport, Decision, InconclusiveReason, OracleReading};
