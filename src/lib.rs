//! PayWave - a TUI client for the PayWave consumer payments demo.
//!
//! This library provides:
//! - Session state and route guarding for the authenticated dashboard
//! - A uniform record store contract with mock and remote backends
//! - Money formatting and reward point calculation
//! - Persisted theme and session preferences

pub mod config;
pub mod domain;
pub mod infra;
