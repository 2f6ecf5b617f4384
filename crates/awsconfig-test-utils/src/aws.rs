//! AWS test utilities
//!
//! Region detection and unique run IDs for the tests that talk to real AWS.

use awsconfig_common::defaults::DEFAULT_REGION;
use chrono::Utc;

/// Get the AWS region for tests.
///
/// Checks `AWS_REGION`, then `AWS_DEFAULT_REGION`, then falls back to the
/// provider default.
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| DEFAULT_REGION.to_string())
}

/// Generate a unique run ID, used as the S3 key prefix of test deliveries.
///
/// Format: `test-{timestamp_ms}-{counter}`
///
/// ```
/// use awsconfig_test_utils::aws::test_run_id;
///
/// assert!(test_run_id().starts_with("test-"));
/// ```
pub fn test_run_id() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let ts = Utc::now().timestamp_millis();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("test-{ts}-{counter}")
}

/// Read a required environment variable for a real-AWS test, or `None` so
/// the test can skip itself with a message.
pub fn required_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => {
            eprintln!("skipping: {name} is not set");
            None
        }
    }
}
