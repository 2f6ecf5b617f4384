//! Fixed names and default configuration values
//!
//! These constants keep the provider, its CLI and its tests in agreement.

/// Resource type name registered with the host orchestrator
pub const RESOURCE_TYPE: &str = "aws_config";

/// Name of the configuration recorder and delivery channel.
///
/// AWS Config assigns "default" to the recorder and it cannot be changed.
/// The delivery channel shares the name so both live under one identifier.
pub const CONFIG_NAME: &str = "default";

/// Default AWS region for the CLI
pub const DEFAULT_REGION: &str = "us-east-2";

/// Total attempts for the delivery channel put during create
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 5;

/// Delay between delivery channel put attempts, in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Returns the default retry attempt count
pub fn default_retry_max_attempts() -> u32 {
    DEFAULT_RETRY_MAX_ATTEMPTS
}

/// Returns the default retry delay in milliseconds
pub fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}
