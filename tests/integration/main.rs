//! Integration tests for the paywave crate.
//!
//! These run against the zero-latency mock backend and a temporary
//! on-disk store, so no network or terminal is involved.

mod dashboard_flow;
mod mock_backend;
mod session_store;
