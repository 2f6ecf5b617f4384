//! The `aws_config` resource: a configuration recorder and its delivery
//! channel managed as one unit.
//!
//! Both sub-resources are named [`CONFIG_NAME`](awsconfig_common::defaults::CONFIG_NAME) and tracked under that
//! identifier. The callbacks in this module are what the host orchestrator
//! invokes; it owns diffing, state storage and per-resource serialization.
//!
//! ## Lifecycle
//!
//! | Callback | Remote calls |
//! |----------|--------------|
//! | create | put recorder, put channel (retried), start recorder, then read |
//! | read | describe recorder, describe channel |
//! | update | describe both, put whichever differs from the plan, then read |
//! | delete | describe recorder, stop recorder, describe channel, delete channel |

mod create;
mod delete;
mod error;
mod update;

pub use error::ResourceError;
pub use update::{reconcile_channel, reconcile_recorder};

use crate::aws::configservice::{ConfigServiceOperations, ConfigurationRecorder, DeliveryChannel};
use crate::retry::RetryPolicy;
use awsconfig_common::{ConfigRecorderConfig, ConfigRecorderState};
use tracing::{debug, info};

/// Resource handler for the recorder/channel pair
pub struct ConfigRecorderResource<C> {
    client: C,
    retry: RetryPolicy,
}

impl<C: ConfigServiceOperations> ConfigRecorderResource<C> {
    /// Create a handler with the default retry policy
    pub fn new(client: C) -> Self {
        Self {
            client,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the retry policy for the delivery channel put during create
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The ConfigService client this handler talks to
    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Read the pair from AWS.
    ///
    /// Returns `Ok(None)` when either sub-resource no longer exists, which
    /// tells the host to drop the identifier from its state.
    pub async fn read(&self, id: &str) -> Result<Option<ConfigRecorderState>, ResourceError> {
        if id.is_empty() {
            return Ok(None);
        }

        match self.fetch_pair(id).await? {
            Some((recorder, channel)) => Ok(Some(state_from_remote(id, &recorder, &channel))),
            None => {
                info!(id = %id, "AWS Config recorder not found, removing from state");
                Ok(None)
            }
        }
    }

    /// Fetch the recorder, then the channel. Either missing yields `None`.
    pub(crate) async fn fetch_pair(
        &self,
        id: &str,
    ) -> Result<Option<(ConfigurationRecorder, DeliveryChannel)>, ResourceError> {
        let Some(recorder) = self.find_recorder(id).await? else {
            return Ok(None);
        };
        let Some(channel) = self.find_channel(id).await? else {
            return Ok(None);
        };
        Ok(Some((recorder, channel)))
    }

    pub(crate) async fn find_recorder(
        &self,
        id: &str,
    ) -> Result<Option<ConfigurationRecorder>, ResourceError> {
        let recorder = self
            .client
            .describe_configuration_recorder(id)
            .await
            .map_err(ResourceError::DescribeRecorder)?;
        debug!(id = %id, found = recorder.is_some(), "Looked up configuration recorder");
        Ok(recorder)
    }

    pub(crate) async fn find_channel(
        &self,
        id: &str,
    ) -> Result<Option<DeliveryChannel>, ResourceError> {
        let channel = self
            .client
            .describe_delivery_channel(id)
            .await
            .map_err(ResourceError::DescribeChannel)?;
        debug!(id = %id, found = channel.is_some(), "Looked up delivery channel");
        Ok(channel)
    }
}

/// Build the delivery channel described by a configuration.
pub(crate) fn channel_from_config(name: &str, config: &ConfigRecorderConfig) -> DeliveryChannel {
    DeliveryChannel {
        name: name.to_string(),
        s3_bucket_name: config.s3_bucket_name.clone(),
        s3_key_prefix: config.s3_key_prefix.clone(),
        sns_topic_arn: config.sns_topic_arn.clone(),
        delivery_frequency: config.delivery_frequency,
        s3_kms_key_arn: None,
    }
}

fn state_from_remote(
    id: &str,
    recorder: &ConfigurationRecorder,
    channel: &DeliveryChannel,
) -> ConfigRecorderState {
    ConfigRecorderState {
        id: id.to_string(),
        name: recorder.name.clone(),
        role_arn: recorder.role_arn.clone(),
        delivery_frequency: channel.delivery_frequency,
        s3_bucket_name: channel.s3_bucket_name.clone(),
        s3_key_prefix: channel.s3_key_prefix.clone(),
        sns_topic_arn: channel.sns_topic_arn.clone(),
    }
}
