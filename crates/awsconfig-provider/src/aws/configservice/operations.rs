//! ConfigService operations trait for testing

use super::ConfigServiceClient;
use super::types::{ConfigurationRecorder, DeliveryChannel, RecorderStatus};
use crate::aws::error::AwsError;
use std::future::Future;

/// Trait for the ConfigService calls the resource handler makes.
///
/// This abstracts the SDK client so the reconciler can be exercised against
/// an in-memory implementation without hitting real AWS.
///
/// Lookups return `Ok(None)` when the named object does not exist.
pub trait ConfigServiceOperations: Send + Sync {
    /// Create or replace the configuration recorder
    fn put_configuration_recorder(
        &self,
        recorder: &ConfigurationRecorder,
    ) -> impl Future<Output = Result<(), AwsError>> + Send;

    /// Look up a configuration recorder by name
    fn describe_configuration_recorder(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<ConfigurationRecorder>, AwsError>> + Send;

    /// Start recording
    fn start_configuration_recorder(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<(), AwsError>> + Send;

    /// Stop recording
    fn stop_configuration_recorder(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<(), AwsError>> + Send;

    /// Create or replace the delivery channel
    fn put_delivery_channel(
        &self,
        channel: &DeliveryChannel,
    ) -> impl Future<Output = Result<(), AwsError>> + Send;

    /// Look up a delivery channel by name
    fn describe_delivery_channel(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<DeliveryChannel>, AwsError>> + Send;

    /// Delete the delivery channel
    fn delete_delivery_channel(&self, name: &str)
    -> impl Future<Output = Result<(), AwsError>> + Send;

    /// Look up the recording status of a recorder
    fn describe_recorder_status(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<RecorderStatus>, AwsError>> + Send;
}

impl ConfigServiceOperations for ConfigServiceClient {
    async fn put_configuration_recorder(
        &self,
        recorder: &ConfigurationRecorder,
    ) -> Result<(), AwsError> {
        ConfigServiceClient::put_configuration_recorder(self, recorder).await
    }

    async fn describe_configuration_recorder(
        &self,
        name: &str,
    ) -> Result<Option<ConfigurationRecorder>, AwsError> {
        ConfigServiceClient::describe_configuration_recorder(self, name).await
    }

    async fn start_configuration_recorder(&self, name: &str) -> Result<(), AwsError> {
        ConfigServiceClient::start_configuration_recorder(self, name).await
    }

    async fn stop_configuration_recorder(&self, name: &str) -> Result<(), AwsError> {
        ConfigServiceClient::stop_configuration_recorder(self, name).await
    }

    async fn put_delivery_channel(&self, channel: &DeliveryChannel) -> Result<(), AwsError> {
        ConfigServiceClient::put_delivery_channel(self, channel).await
    }

    async fn describe_delivery_channel(
        &self,
        name: &str,
    ) -> Result<Option<DeliveryChannel>, AwsError> {
        ConfigServiceClient::describe_delivery_channel(self, name).await
    }

    async fn delete_delivery_channel(&self, name: &str) -> Result<(), AwsError> {
        ConfigServiceClient::delete_delivery_channel(self, name).await
    }

    async fn describe_recorder_status(
        &self,
        name: &str,
    ) -> Result<Option<RecorderStatus>, AwsError> {
        ConfigServiceClient::describe_recorder_status(self, name).await
    }
}
