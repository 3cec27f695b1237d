//! This module provides reusable test utilities:
//! - Mock HTTP height explorers and a mock daemon JSON-RPC endpoint
//! - In-process oracles with scripted behavior
//! - A restarter that records calls instead of running commands
//! - Test configuration builders

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod recording_restarter;
pub mod static_oracle;
pub mod test_config;

// Re-export commonly used items
pub use mock_oracle::{MockDaemonServer, MockHeightServer};
pub use recording_restarter::RecordingRestarter;
pub use static_oracle::{Behavior, StaticOracle};
pub use test_config::TestConfigBuilder;
