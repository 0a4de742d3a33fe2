//! P2P-WATCH: live terminal monitor for peer-to-peer crypto offers.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod prompt;
pub mod exchange;
pub mod engine;
pub mod display;
