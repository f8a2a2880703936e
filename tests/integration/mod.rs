//! Integration Tests Module
//!
//! End-to-end tests that drive the monitor, the gateway client and the
//! notification channels against in-memory services or local mock servers.

pub mod notify;
