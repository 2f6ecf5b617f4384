//! AWS Config (ConfigService) recorder and delivery channel management

mod operations;
mod types;

pub use operations::ConfigServiceOperations;
pub use types::{ConfigurationRecorder, DeliveryChannel, RecorderStatus};

use crate::aws::context::AwsContext;
use crate::aws::error::{AwsError, classify_sdk_error};
use anyhow::Result;
use aws_sdk_config::Client;
use tracing::{debug, info};

/// ConfigService client for the recorder/channel pair
pub struct ConfigServiceClient {
    client: Client,
}

/// Turn a lookup failure into `Ok(None)` when the object does not exist.
fn lookup_result<T>(error: AwsError) -> Result<Option<T>, AwsError> {
    if error.is_not_found() {
        debug!(code = ?error.code(), "Lookup found nothing");
        Ok(None)
    } else {
        Err(error)
    }
}

impl ConfigServiceClient {
    /// Create a new ConfigService client (loads AWS config from environment)
    pub async fn new(region: &str) -> Result<Self> {
        let ctx = AwsContext::new(region).await;
        Ok(Self::from_context(&ctx))
    }

    /// Create a ConfigService client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.configservice_client(),
        }
    }

    /// Create or replace the configuration recorder
    pub async fn put_configuration_recorder(
        &self,
        recorder: &ConfigurationRecorder,
    ) -> Result<(), AwsError> {
        info!(name = %recorder.name, role_arn = ?recorder.role_arn, "Putting configuration recorder");

        self.client
            .put_configuration_recorder()
            .configuration_recorder(recorder.to_sdk())
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(())
    }

    /// Look up a configuration recorder by name
    pub async fn describe_configuration_recorder(
        &self,
        name: &str,
    ) -> Result<Option<ConfigurationRecorder>, AwsError> {
        let response = match self
            .client
            .describe_configuration_recorders()
            .configuration_recorder_names(name)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return lookup_result(classify_sdk_error(&e)),
        };

        Ok(response
            .configuration_recorders()
            .iter()
            .filter_map(ConfigurationRecorder::from_sdk)
            .find(|r| r.name == name))
    }

    /// Start recording
    pub async fn start_configuration_recorder(&self, name: &str) -> Result<(), AwsError> {
        info!(name = %name, "Starting configuration recorder");

        self.client
            .start_configuration_recorder()
            .configuration_recorder_name(name)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(())
    }

    /// Stop recording
    pub async fn stop_configuration_recorder(&self, name: &str) -> Result<(), AwsError> {
        info!(name = %name, "Stopping configuration recorder");

        self.client
            .stop_configuration_recorder()
            .configuration_recorder_name(name)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(())
    }

    /// Create or replace the delivery channel
    pub async fn put_delivery_channel(&self, channel: &DeliveryChannel) -> Result<(), AwsError> {
        info!(
            name = %channel.name,
            bucket = ?channel.s3_bucket_name,
            frequency = ?channel.delivery_frequency,
            "Putting delivery channel"
        );

        self.client
            .put_delivery_channel()
            .delivery_channel(channel.to_sdk())
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(())
    }

    /// Look up a delivery channel by name
    pub async fn describe_delivery_channel(
        &self,
        name: &str,
    ) -> Result<Option<DeliveryChannel>, AwsError> {
        let response = match self
            .client
            .describe_delivery_channels()
            .delivery_channel_names(name)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return lookup_result(classify_sdk_error(&e)),
        };

        Ok(response
            .delivery_channels()
            .iter()
            .filter_map(DeliveryChannel::from_sdk)
            .find(|c| c.name == name))
    }

    /// Delete the delivery channel
    pub async fn delete_delivery_channel(&self, name: &str) -> Result<(), AwsError> {
        info!(name = %name, "Deleting delivery channel");

        self.client
            .delete_delivery_channel()
            .delivery_channel_name(name)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(())
    }

    /// Look up the recording status of a recorder
    pub async fn describe_recorder_status(
        &self,
        name: &str,
    ) -> Result<Option<RecorderStatus>, AwsError> {
        let response = match self
            .client
            .describe_configuration_recorder_status()
            .configuration_recorder_names(name)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return lookup_result(classify_sdk_error(&e)),
        };

        Ok(response
            .configuration_recorders_status()
            .iter()
            .filter_map(RecorderStatus::from_sdk)
            .find(|s| s.name == name))
    }
}
