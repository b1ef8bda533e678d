// ABOUTME: Library root for deploy-wait - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod observer;
pub mod orchestrator;
pub mod output;
pub mod provider;
pub mod types;
pub mod wait;
