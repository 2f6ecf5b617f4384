//! In-memory ConfigService
//!
//! [`FakeConfigService`] implements [`ConfigServiceOperations`] over a single
//! account/region worth of state and follows the service's ordering rules:
//!
//! - a delivery channel can only be put once a recorder exists
//! - a recorder can only start once a delivery channel exists
//! - the channel cannot be deleted while the recorder is recording
//!
//! Every call is logged, and failures can be scripted per operation.

use awsconfig_provider::aws::{
    AwsError, ConfigServiceOperations, ConfigurationRecorder, DeliveryChannel, RecorderStatus,
    classify_aws_error,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// A ConfigService operation, as recorded in the call log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    PutRecorder,
    DescribeRecorder,
    StartRecorder,
    StopRecorder,
    PutChannel,
    DescribeChannel,
    DeleteChannel,
    DescribeStatus,
}

#[derive(Default)]
struct State {
    recorder: Option<ConfigurationRecorder>,
    channel: Option<DeliveryChannel>,
    recording: bool,
    calls: Vec<Call>,
    failures: HashMap<Call, VecDeque<AwsError>>,
}

/// In-memory stand-in for the AWS Config service
#[derive(Default)]
pub struct FakeConfigService {
    state: Mutex<State>,
}

fn service_error(code: &str, message: &str) -> AwsError {
    classify_aws_error(Some(code), Some(message))
}

impl FakeConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing recorder and channel, recording.
    pub fn with_pair(recorder: ConfigurationRecorder, channel: DeliveryChannel) -> Self {
        let fake = Self::new();
        {
            let mut state = fake.lock();
            state.recorder = Some(recorder);
            state.channel = Some(channel);
            state.recording = true;
        }
        fake
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("fake state poisoned")
    }

    /// Make the next call to `call` fail with `error`. Queued failures are
    /// consumed in order.
    pub fn fail_next(&self, call: Call, error: AwsError) {
        self.lock().failures.entry(call).or_default().push_back(error);
    }

    /// Make the next `times` calls to `call` fail with the given error code.
    pub fn fail_times(&self, call: Call, times: usize, code: &str) {
        for attempt in 1..=times {
            self.fail_next(call, service_error(code, &format!("scripted failure {attempt}")));
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, call: Call) -> usize {
        self.lock().calls.iter().filter(|c| **c == call).count()
    }

    /// Number of calls that changed, or tried to change, remote state
    pub fn mutation_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| {
                !matches!(
                    c,
                    Call::DescribeRecorder | Call::DescribeChannel | Call::DescribeStatus
                )
            })
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn recorder(&self) -> Option<ConfigurationRecorder> {
        self.lock().recorder.clone()
    }

    pub fn channel(&self) -> Option<DeliveryChannel> {
        self.lock().channel.clone()
    }

    pub fn is_recording(&self) -> bool {
        self.lock().recording
    }

    /// Remove the channel out of band, as if someone deleted it by hand.
    pub fn drop_channel(&self) {
        let mut state = self.lock();
        state.channel = None;
        state.recording = false;
    }

    /// Log the call and pop a scripted failure, if any.
    fn begin(&self, call: Call) -> Result<MutexGuard<'_, State>, AwsError> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.failures.get_mut(&call).and_then(VecDeque::pop_front) {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }
}

impl ConfigServiceOperations for FakeConfigService {
    async fn put_configuration_recorder(
        &self,
        recorder: &ConfigurationRecorder,
    ) -> Result<(), AwsError> {
        let mut state = self.begin(Call::PutRecorder)?;
        if state.recorder.as_ref().is_some_and(|r| r.name != recorder.name) {
            return Err(service_error(
                "MaxNumberOfConfigurationRecordersExceededException",
                "Failed to put configuration recorder because you have reached the limit",
            ));
        }
        state.recorder = Some(recorder.clone());
        Ok(())
    }

    async fn describe_configuration_recorder(
        &self,
        name: &str,
    ) -> Result<Option<ConfigurationRecorder>, AwsError> {
        let state = self.begin(Call::DescribeRecorder)?;
        Ok(state.recorder.clone().filter(|r| r.name == name))
    }

    async fn start_configuration_recorder(&self, name: &str) -> Result<(), AwsError> {
        let mut state = self.begin(Call::StartRecorder)?;
        if !state.recorder.as_ref().is_some_and(|r| r.name == name) {
            return Err(service_error(
                "NoSuchConfigurationRecorderException",
                "Cannot find configuration recorder",
            ));
        }
        if state.channel.is_none() {
            return Err(service_error(
                "NoAvailableDeliveryChannelException",
                "Delivery channel is not available to start configuration recorder",
            ));
        }
        state.recording = true;
        Ok(())
    }

    async fn stop_configuration_recorder(&self, name: &str) -> Result<(), AwsError> {
        let mut state = self.begin(Call::StopRecorder)?;
        if !state.recorder.as_ref().is_some_and(|r| r.name == name) {
            return Err(service_error(
                "NoSuchConfigurationRecorderException",
                "Cannot find configuration recorder",
            ));
        }
        state.recording = false;
        Ok(())
    }

    async fn put_delivery_channel(&self, channel: &DeliveryChannel) -> Result<(), AwsError> {
        let mut state = self.begin(Call::PutChannel)?;
        if state.recorder.is_none() {
            return Err(service_error(
                "NoAvailableConfigurationRecorderException",
                "Configuration recorder is not available to put delivery channel",
            ));
        }
        if channel.s3_bucket_name.is_none() {
            return Err(service_error(
                "NoSuchBucketException",
                "Cannot find a S3 bucket with an empty bucket name",
            ));
        }
        state.channel = Some(channel.clone());
        Ok(())
    }

    async fn describe_delivery_channel(
        &self,
        name: &str,
    ) -> Result<Option<DeliveryChannel>, AwsError> {
        let state = self.begin(Call::DescribeChannel)?;
        Ok(state.channel.clone().filter(|c| c.name == name))
    }

    async fn delete_delivery_channel(&self, name: &str) -> Result<(), AwsError> {
        let mut state = self.begin(Call::DeleteChannel)?;
        if !state.channel.as_ref().is_some_and(|c| c.name == name) {
            return Err(service_error(
                "NoSuchDeliveryChannelException",
                "Cannot find delivery channel",
            ));
        }
        if state.recording {
            return Err(service_error(
                "LastDeliveryChannelDeleteFailedException",
                "Failed to delete last specified delivery channel because the ConfigurationRecorder is running",
            ));
        }
        state.channel = None;
        Ok(())
    }

    async fn describe_recorder_status(
        &self,
        name: &str,
    ) -> Result<Option<RecorderStatus>, AwsError> {
        let state = self.begin(Call::DescribeStatus)?;
        let recording = state.recording;
        Ok(state
            .recorder
            .as_ref()
            .filter(|r| r.name == name)
            .map(|r| RecorderStatus {
                name: r.name.clone(),
                recording,
                last_status: recording.then(|| "SUCCESS".to_string()),
                last_error_code: None,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> ConfigurationRecorder {
        ConfigurationRecorder::new("default", "arn:aws:iam::123456789012:role/config")
    }

    fn channel() -> DeliveryChannel {
        DeliveryChannel {
            s3_bucket_name: Some("bucket".to_string()),
            ..DeliveryChannel::named("default")
        }
    }

    #[tokio::test]
    async fn channel_requires_recorder() {
        let fake = FakeConfigService::new();
        let err = fake.put_delivery_channel(&channel()).await.unwrap_err();
        assert_eq!(err.code(), Some("NoAvailableConfigurationRecorderException"));
        assert!(fake.channel().is_none());
    }

    #[tokio::test]
    async fn start_requires_channel() {
        let fake = FakeConfigService::new();
        fake.put_configuration_recorder(&recorder()).await.unwrap();
        let err = fake.start_configuration_recorder("default").await.unwrap_err();
        assert_eq!(err.code(), Some("NoAvailableDeliveryChannelException"));
        assert!(!fake.is_recording());
    }

    #[tokio::test]
    async fn channel_delete_refused_while_recording() {
        let fake = FakeConfigService::with_pair(recorder(), channel());
        let err = fake.delete_delivery_channel("default").await.unwrap_err();
        assert_eq!(err.code(), Some("LastDeliveryChannelDeleteFailedException"));

        fake.stop_configuration_recorder("default").await.unwrap();
        fake.delete_delivery_channel("default").await.unwrap();
        assert!(fake.channel().is_none());
    }

    #[tokio::test]
    async fn scripted_failures_are_consumed_in_order() {
        let fake = FakeConfigService::new();
        fake.fail_times(Call::DescribeRecorder, 2, "ThrottlingException");

        assert!(fake.describe_configuration_recorder("default").await.is_err());
        assert!(fake.describe_configuration_recorder("default").await.is_err());
        assert_eq!(fake.describe_configuration_recorder("default").await, Ok(None));
        assert_eq!(fake.call_count(Call::DescribeRecorder), 3);
    }

    #[tokio::test]
    async fn describe_filters_by_name() {
        let fake = FakeConfigService::with_pair(recorder(), channel());
        assert!(fake.describe_configuration_recorder("other").await.unwrap().is_none());
        assert!(fake.describe_delivery_channel("default").await.unwrap().is_some());
        assert_eq!(fake.mutation_count(), 0);
    }
}
