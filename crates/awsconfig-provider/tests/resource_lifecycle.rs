//! Resource lifecycle tests against the in-memory ConfigService
//!
//! Time is paused so the delivery channel retry sleeps complete instantly
//! while still being measurable.

use aws_sdk_config::types::{RecordingGroup, ResourceType};
use awsconfig_common::{ConfigRecorderConfig, DeliveryFrequency};
use awsconfig_provider::aws::{AwsError, ConfigurationRecorder, DeliveryChannel};
use awsconfig_provider::{ConfigRecorderResource, ResourceError, RetryPolicy};
use awsconfig_test_utils::{Call, FakeConfigService};
use std::time::Duration;
use tokio::time::Instant;

const ROLE: &str = "arn:aws:iam::123456789012:role/config-recorder";
const OTHER_ROLE: &str = "arn:aws:iam::123456789012:role/config-recorder-v2";
const PENDING: &str = "InsufficientDeliveryPolicyException";

/// Paused-clock sleeps land on the requested deadline, give or take the
/// timer wheel's millisecond rounding.
fn assert_slept(elapsed: Duration, expected: Duration) {
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(10),
        "slept {elapsed:?}, expected {expected:?}"
    );
}

fn full_config() -> ConfigRecorderConfig {
    ConfigRecorderConfig::new(ROLE)
        .with_s3_bucket("config-snapshots")
        .with_s3_key_prefix("acct")
        .with_sns_topic("arn:aws:sns:us-east-2:123456789012:config")
        .with_delivery_frequency(DeliveryFrequency::SixHours)
}

fn resource() -> ConfigRecorderResource<FakeConfigService> {
    ConfigRecorderResource::new(FakeConfigService::new())
}

fn channel_for(config: &ConfigRecorderConfig) -> DeliveryChannel {
    DeliveryChannel {
        s3_bucket_name: config.s3_bucket_name.clone(),
        s3_key_prefix: config.s3_key_prefix.clone(),
        sns_topic_arn: config.sns_topic_arn.clone(),
        delivery_frequency: config.delivery_frequency,
        ..DeliveryChannel::named("default")
    }
}

fn existing(config: &ConfigRecorderConfig) -> ConfigRecorderResource<FakeConfigService> {
    let channel = channel_for(config);
    let recorder = ConfigurationRecorder::new("default", config.role_arn.clone().unwrap());
    ConfigRecorderResource::new(FakeConfigService::with_pair(recorder, channel))
}

mod create {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn round_trips_all_attributes() {
        let resource = resource();
        let config = full_config();

        let state = resource.create(&config).await.unwrap();

        assert_eq!(state.id, "default");
        assert_eq!(state.name, "default");
        assert_eq!(state.attributes(), config);
        assert!(resource.client().is_recording());

        let reread = resource.read(&state.id).await.unwrap();
        assert_eq!(reread, Some(state));
    }

    #[tokio::test(start_paused = true)]
    async fn round_trips_every_frequency_and_optional_subset() {
        let frequencies = DeliveryFrequency::VALID_VALUES
            .iter()
            .map(|literal| Some(literal.parse::<DeliveryFrequency>().unwrap()))
            .chain([None]);

        for frequency in frequencies {
            for mask in 0..4u8 {
                let config = ConfigRecorderConfig {
                    role_arn: Some(ROLE.to_string()),
                    delivery_frequency: frequency,
                    s3_bucket_name: Some("config-snapshots".to_string()),
                    s3_key_prefix: (mask & 1 != 0).then(|| "acct".to_string()),
                    sns_topic_arn: (mask & 2 != 0)
                        .then(|| "arn:aws:sns:us-east-2:123456789012:config".to_string()),
                };
                let resource = resource();

                let created = resource.create(&config).await.unwrap();
                let read = resource.read(&created.id).await.unwrap().unwrap();

                assert_eq!(read.attributes(), config, "frequency {frequency:?}, mask {mask}");
                assert_eq!(created, read);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn issues_calls_in_order() {
        let resource = resource();
        resource.create(&full_config()).await.unwrap();

        assert_eq!(
            resource.client().calls(),
            vec![
                Call::PutRecorder,
                Call::PutChannel,
                Call::StartRecorder,
                Call::DescribeRecorder,
                Call::DescribeChannel,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_role_fails_before_any_call() {
        let resource = resource();
        let config = ConfigRecorderConfig::default().with_s3_bucket("config-snapshots");

        let err = resource.create(&config).await.unwrap_err();

        assert!(err.is_validation(), "unexpected error: {err}");
        assert!(err.to_string().contains("role_arn"));
        assert_eq!(resource.client().total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_role_fails_before_any_call() {
        let resource = resource();
        let err = resource
            .create(&ConfigRecorderConfig::new("").with_s3_bucket("b"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(resource.client().total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn recorder_failure_is_prefixed() {
        let resource = resource();
        resource
            .client()
            .fail_times(Call::PutRecorder, 1, "InvalidRoleException");

        let err = resource.create(&full_config()).await.unwrap_err();

        assert!(matches!(err, ResourceError::CreateRecorder(_)));
        assert!(
            err.to_string()
                .starts_with("Failed to create ConfigurationRecorder: InvalidRoleException")
        );
        assert_eq!(resource.client().call_count(Call::PutChannel), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn start_failure_is_prefixed() {
        let resource = resource();
        resource
            .client()
            .fail_times(Call::StartRecorder, 1, "InsufficientPermissionsException");

        let err = resource.create(&full_config()).await.unwrap_err();

        assert!(matches!(err, ResourceError::StartRecorder(_)));
        assert!(err.to_string().starts_with("Error starting ConfigurationRecorder:"));
        assert!(!resource.client().is_recording());
    }

    /// A failed channel put does not undo the recorder put.
    #[tokio::test(start_paused = true)]
    async fn channel_failure_leaves_recorder_behind() {
        let resource = resource();
        resource
            .client()
            .fail_times(Call::PutChannel, 1, "NoSuchBucketException");

        let err = resource.create(&full_config()).await.unwrap_err();

        assert!(err.to_string().starts_with("Failed to create DeliveryChannel:"));
        let recorder = resource.client().recorder().expect("recorder left behind");
        assert_eq!(recorder.role_arn.as_deref(), Some(ROLE));
        assert!(resource.client().channel().is_none());
        assert_eq!(resource.client().call_count(Call::StartRecorder), 0);
    }
}

mod retry {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_fifth_attempt() {
        let resource = resource();
        resource.client().fail_times(Call::PutChannel, 4, PENDING);

        let start = Instant::now();
        let state = resource.create(&full_config()).await.unwrap();

        assert_eq!(resource.client().call_count(Call::PutChannel), 5);
        assert_slept(start.elapsed(), Duration::from_secs(4));
        assert_eq!(state.s3_bucket_name.as_deref(), Some("config-snapshots"));
        assert!(resource.client().is_recording());
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_five_attempts() {
        let resource = resource();
        resource.client().fail_times(Call::PutChannel, 6, PENDING);

        let start = Instant::now();
        let err = resource.create(&full_config()).await.unwrap_err();

        assert_eq!(resource.client().call_count(Call::PutChannel), 5);
        assert_slept(start.elapsed(), Duration::from_secs(4));
        match &err {
            ResourceError::CreateChannel(AwsError::DeliveryPolicyPending { message }) => {
                assert_eq!(message, "scripted failure 5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(resource.client().call_count(Call::StartRecorder), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn other_errors_are_not_retried() {
        let resource = resource();
        resource
            .client()
            .fail_times(Call::PutChannel, 1, "InvalidS3KeyPrefixException");

        let start = Instant::now();
        let err = resource.create(&full_config()).await.unwrap_err();

        assert_eq!(resource.client().call_count(Call::PutChannel), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(
            err.aws_error().and_then(AwsError::code),
            Some("InvalidS3KeyPrefixException")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn honors_configured_policy() {
        let resource = ConfigRecorderResource::new(FakeConfigService::new())
            .with_retry_policy(RetryPolicy::new(2, Duration::from_millis(250)));
        resource.client().fail_times(Call::PutChannel, 2, PENDING);

        let start = Instant::now();
        let err = resource.create(&full_config()).await.unwrap_err();

        assert!(matches!(err, ResourceError::CreateChannel(_)));
        assert_eq!(resource.client().call_count(Call::PutChannel), 2);
        assert_slept(start.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn update_does_not_retry_channel_put() {
        let resource = existing(&full_config());
        resource.client().fail_times(Call::PutChannel, 1, PENDING);

        let planned = full_config().with_delivery_frequency(DeliveryFrequency::OneHour);
        let err = resource.update("default", &planned).await.unwrap_err();

        assert!(matches!(err, ResourceError::UpdateChannel(_)));
        assert_eq!(resource.client().call_count(Call::PutChannel), 1);
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn missing_recorder_is_none() {
        let resource = resource();
        assert_eq!(resource.read("default").await.unwrap(), None);
        assert_eq!(resource.client().calls(), vec![Call::DescribeRecorder]);
    }

    #[tokio::test]
    async fn missing_channel_is_none() {
        let resource = existing(&full_config());
        resource.client().drop_channel();

        assert_eq!(resource.read("default").await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_id_makes_no_calls() {
        let resource = existing(&full_config());
        assert_eq!(resource.read("").await.unwrap(), None);
        assert_eq!(resource.client().total_calls(), 0);
    }

    #[tokio::test]
    async fn lookup_failure_is_an_error() {
        let resource = existing(&full_config());
        resource
            .client()
            .fail_times(Call::DescribeChannel, 1, "ThrottlingException");

        let err = resource.read("default").await.unwrap_err();

        assert!(matches!(err, ResourceError::DescribeChannel(AwsError::Throttled { .. })));
        assert!(
            err.to_string()
                .starts_with("Failed to retrieve information about delivery channel:")
        );
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn frequency_change_only_puts_channel() {
        let config = full_config();
        let resource = existing(&config);

        let planned = config
            .clone()
            .with_delivery_frequency(DeliveryFrequency::TwentyFourHours);
        let state = resource.update("default", &planned).await.unwrap().unwrap();

        assert_eq!(resource.client().call_count(Call::PutChannel), 1);
        assert_eq!(resource.client().call_count(Call::PutRecorder), 0);
        assert_eq!(
            state.delivery_frequency,
            Some(DeliveryFrequency::TwentyFourHours)
        );
        assert_eq!(state.s3_bucket_name, config.s3_bucket_name);
        assert_eq!(state.s3_key_prefix, config.s3_key_prefix);
        assert_eq!(state.sns_topic_arn, config.sns_topic_arn);
        assert_eq!(state.role_arn.as_deref(), Some(ROLE));
    }

    #[tokio::test]
    async fn role_change_only_puts_recorder() {
        let config = full_config();
        let resource = existing(&config);

        let planned = ConfigRecorderConfig {
            role_arn: Some(OTHER_ROLE.to_string()),
            ..config
        };
        let state = resource.update("default", &planned).await.unwrap().unwrap();

        assert_eq!(resource.client().call_count(Call::PutRecorder), 1);
        assert_eq!(resource.client().call_count(Call::PutChannel), 0);
        assert_eq!(state.role_arn.as_deref(), Some(OTHER_ROLE));
    }

    #[tokio::test]
    async fn role_change_keeps_unmanaged_settings() {
        let config = full_config();
        let group = RecordingGroup::builder()
            .all_supported(false)
            .resource_types(ResourceType::from("AWS::S3::Bucket"))
            .build();
        let kms_key = "arn:aws:kms:us-east-2:123456789012:key/config";
        let recorder = ConfigurationRecorder {
            recording_group: Some(group.clone()),
            ..ConfigurationRecorder::new("default", ROLE)
        };
        let channel = DeliveryChannel {
            s3_kms_key_arn: Some(kms_key.to_string()),
            ..channel_for(&config)
        };
        let resource =
            ConfigRecorderResource::new(FakeConfigService::with_pair(recorder, channel));

        let planned = ConfigRecorderConfig {
            role_arn: Some(OTHER_ROLE.to_string()),
            ..config.with_delivery_frequency(DeliveryFrequency::OneHour)
        };
        resource.update("default", &planned).await.unwrap().unwrap();

        let recorder = resource.client().recorder().unwrap();
        assert_eq!(recorder.role_arn.as_deref(), Some(OTHER_ROLE));
        assert_eq!(recorder.recording_group, Some(group));
        let channel = resource.client().channel().unwrap();
        assert_eq!(channel.delivery_frequency, Some(DeliveryFrequency::OneHour));
        assert_eq!(channel.s3_kms_key_arn.as_deref(), Some(kms_key));
    }

    #[tokio::test]
    async fn unchanged_plan_makes_no_mutations() {
        let config = full_config();
        let resource = existing(&config);

        let state = resource.update("default", &config).await.unwrap().unwrap();

        assert_eq!(resource.client().mutation_count(), 0);
        assert_eq!(state.attributes(), config);
    }

    #[tokio::test]
    async fn removed_topic_is_cleared() {
        let config = full_config();
        let resource = existing(&config);

        let planned = ConfigRecorderConfig {
            sns_topic_arn: None,
            ..config
        };
        let state = resource.update("default", &planned).await.unwrap().unwrap();

        assert_eq!(state.sns_topic_arn, None);
        assert_eq!(resource.client().channel().unwrap().sns_topic_arn, None);
    }

    #[tokio::test]
    async fn missing_pair_is_none() {
        let resource = resource();
        let result = resource.update("default", &full_config()).await.unwrap();

        assert_eq!(result, None);
        assert_eq!(resource.client().mutation_count(), 0);
    }

    #[tokio::test]
    async fn invalid_plan_fails_before_any_call() {
        let resource = existing(&full_config());
        let planned = ConfigRecorderConfig {
            role_arn: None,
            ..full_config()
        };

        let err = resource.update("default", &planned).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(resource.client().total_calls(), 0);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn stops_recorder_before_deleting_channel() {
        let resource = existing(&full_config());

        resource.delete("default").await.unwrap();

        assert_eq!(
            resource.client().calls(),
            vec![
                Call::DescribeRecorder,
                Call::StopRecorder,
                Call::DescribeChannel,
                Call::DeleteChannel,
            ]
        );
        assert!(resource.client().channel().is_none());
        assert!(!resource.client().is_recording());
        assert_eq!(resource.read("default").await.unwrap(), None);
    }

    #[tokio::test]
    async fn absent_recorder_is_success() {
        let resource = resource();

        resource.delete("default").await.unwrap();
        resource.delete("default").await.unwrap();

        assert_eq!(resource.client().mutation_count(), 0);
    }

    #[tokio::test]
    async fn absent_channel_stops_and_succeeds() {
        let resource = existing(&full_config());
        resource.client().drop_channel();

        resource.delete("default").await.unwrap();

        assert_eq!(resource.client().call_count(Call::StopRecorder), 1);
        assert_eq!(resource.client().call_count(Call::DeleteChannel), 0);
    }

    #[tokio::test]
    async fn stop_failure_is_prefixed() {
        let resource = existing(&full_config());
        resource
            .client()
            .fail_times(Call::StopRecorder, 1, "ThrottlingException");

        let err = resource.delete("default").await.unwrap_err();

        assert!(err.to_string().starts_with("Error stopping configuration recording:"));
        assert_eq!(resource.client().call_count(Call::DeleteChannel), 0);
    }

    #[tokio::test]
    async fn channel_delete_error_is_verbatim() {
        let resource = existing(&full_config());
        resource
            .client()
            .fail_times(Call::DeleteChannel, 1, "LastDeliveryChannelDeleteFailedException");

        let err = resource.delete("default").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "LastDeliveryChannelDeleteFailedException: scripted failure 1"
        );
        assert_eq!(resource.client().call_count(Call::DeleteChannel), 1);
    }
}
