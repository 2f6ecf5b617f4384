//! Bounded retry with a fixed delay.
//!
//! AWS Config rejects a new delivery channel with
//! `InsufficientDeliveryPolicyException` until the bucket and role it points
//! at are visible to the service. This module retries a single call on such
//! a transient error a fixed number of times and gives up with the last
//! error.

use awsconfig_common::defaults::{DEFAULT_RETRY_DELAY_MS, DEFAULT_RETRY_MAX_ATTEMPTS};
use backon::{BackoffBuilder, ConstantBuilder};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry policy: total attempts and the fixed delay between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one (at least 1)
    pub max_attempts: u32,
    /// Delay between consecutive attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Longest time spent sleeping before the last attempt
    pub fn worst_case_delay(&self) -> Duration {
        self.delay * self.max_attempts.max(1).saturating_sub(1)
    }
}

/// Run `op` until it succeeds, fails with a non-transient error, or the
/// attempt budget is spent.
///
/// # Arguments
/// * `policy` - Attempt budget and delay
/// * `is_transient` - Returns true for errors worth another attempt
/// * `op` - The call to make; invoked once per attempt
/// * `operation` - Name for logging
///
/// # Returns
/// * `Ok(value)` from the first successful attempt
/// * `Err` immediately for a non-transient error
/// * `Err` with the last transient error once `max_attempts` calls failed
pub async fn retry_transient<T, E, F, Fut, P>(
    policy: RetryPolicy,
    is_transient: P,
    mut op: F,
    operation: &str,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delays = ConstantBuilder::default()
        .with_delay(policy.delay)
        .with_max_times(max_attempts as usize - 1)
        .build();

    let mut attempt = 0u32;
    loop {
        attempt += 1;

        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(operation, attempt, "Succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) if is_transient(&e) => match delays.next() {
                Some(delay) => {
                    debug!(
                        operation,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    warn!(operation, attempts = attempt, error = %e, "Giving up after transient failures");
                    return Err(e);
                }
            },
            Err(e) => return Err(e),
        }
    }
}
