//! Create callback

use super::{ConfigRecorderResource, ResourceError, channel_from_config};
use crate::aws::configservice::{ConfigServiceOperations, ConfigurationRecorder, DeliveryChannel};
use crate::aws::error::AwsError;
use crate::retry::retry_transient;
use awsconfig_common::defaults::CONFIG_NAME;
use awsconfig_common::{ConfigRecorderConfig, ConfigRecorderState};
use tracing::info;

impl<C: ConfigServiceOperations> ConfigRecorderResource<C> {
    /// Create the recorder and channel, then start recording.
    ///
    /// The configuration is validated before any remote call. A failure at
    /// any stage aborts the create; sub-resources created by earlier stages
    /// are left in place for the next reconciliation to pick up.
    pub async fn create(
        &self,
        config: &ConfigRecorderConfig,
    ) -> Result<ConfigRecorderState, ResourceError> {
        let role_arn = config.validated_role_arn()?;

        info!(name = CONFIG_NAME, role_arn = %role_arn, "Creating AWS Config recorder");

        let recorder = ConfigurationRecorder::new(CONFIG_NAME, role_arn);
        self.client
            .put_configuration_recorder(&recorder)
            .await
            .map_err(ResourceError::CreateRecorder)?;

        let channel = channel_from_config(CONFIG_NAME, config);
        self.put_channel_with_retry(&channel)
            .await
            .map_err(ResourceError::CreateChannel)?;

        self.client
            .start_configuration_recorder(CONFIG_NAME)
            .await
            .map_err(ResourceError::StartRecorder)?;

        info!(id = CONFIG_NAME, "AWS Config recorder created and recording");

        self.read(CONFIG_NAME)
            .await?
            .ok_or_else(|| ResourceError::Vanished {
                id: CONFIG_NAME.to_string(),
            })
    }

    /// Put the delivery channel, retrying while AWS Config cannot yet see
    /// the bucket or topic policy.
    pub(crate) async fn put_channel_with_retry(
        &self,
        channel: &DeliveryChannel,
    ) -> Result<(), AwsError> {
        retry_transient(
            self.retry,
            AwsError::is_delivery_policy_pending,
            || self.client.put_delivery_channel(channel),
            "PutDeliveryChannel",
        )
        .await
    }
}
