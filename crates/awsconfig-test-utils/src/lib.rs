//! Shared test utilities for awsconfig-provider
//!
//! ## Modules
//!
//! - [`aws`]: AWS region detection and test run ID generation
//! - [`fake`]: in-memory ConfigService for driving the resource handler

pub mod aws;
pub mod fake;

pub use aws::{get_test_region, test_run_id};
pub use fake::{Call, FakeConfigService};
