//! Provider configuration
//!
//! Built from the command line (see `main.rs`) and validated with `garde`
//! before any AWS client is created.

use crate::aws::configservice::ConfigServiceClient;
use crate::aws::context::AwsContext;
use crate::resource::ConfigRecorderResource;
use crate::retry::RetryPolicy;
use awsconfig_common::defaults::{
    DEFAULT_REGION, default_retry_delay_ms, default_retry_max_attempts,
};
use std::time::Duration;

/// AWS and retry settings for the provider
#[derive(Debug, Clone, PartialEq, Eq, garde::Validate)]
pub struct ProviderConfig {
    /// AWS region
    #[garde(length(min = 1))]
    pub region: String,

    /// AWS profile name (overrides default credential resolution)
    #[garde(skip)]
    pub aws_profile: Option<String>,

    /// Total attempts for the delivery channel put during create
    #[garde(range(min = 1, max = 100))]
    pub max_attempts: u32,

    /// Delay between those attempts, in milliseconds
    #[garde(range(max = 60_000))]
    pub retry_delay_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            aws_profile: None,
            max_attempts: default_retry_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl ProviderConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }

    /// Load the AWS context described by this configuration.
    pub async fn aws_context(&self) -> AwsContext {
        AwsContext::with_profile(&self.region, self.aws_profile.as_deref()).await
    }

    /// Build the resource handler backed by the real ConfigService client.
    pub fn resource(&self, ctx: &AwsContext) -> ConfigRecorderResource<ConfigServiceClient> {
        ConfigRecorderResource::new(ConfigServiceClient::from_context(ctx))
            .with_retry_policy(self.retry_policy())
    }
}
