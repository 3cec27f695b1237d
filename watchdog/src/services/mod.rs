// File: watchdog/src/services/mod.rs

pub mod restart_service;

pub use restart_service::{CommandRestarter, Restarter};
