//! ConfigService value types
//!
//! Plain Rust mirrors of the SDK shapes the resource handler reads and
//! writes. Settings the `aws_config` resource does not manage are carried
//! through unchanged so a put never resets them.

use aws_sdk_config::types as sdk;
use awsconfig_common::DeliveryFrequency;
use tracing::warn;

/// A configuration recorder
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationRecorder {
    pub name: String,
    pub role_arn: Option<String>,
    /// Unmanaged; preserved from the last describe
    pub recording_group: Option<sdk::RecordingGroup>,
    /// Unmanaged; preserved from the last describe
    pub recording_mode: Option<sdk::RecordingMode>,
}

impl ConfigurationRecorder {
    pub fn new(name: impl Into<String>, role_arn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role_arn: Some(role_arn.into()),
            recording_group: None,
            recording_mode: None,
        }
    }

    pub(crate) fn to_sdk(&self) -> sdk::ConfigurationRecorder {
        sdk::ConfigurationRecorder::builder()
            .name(&self.name)
            .set_role_arn(self.role_arn.clone())
            .set_recording_group(self.recording_group.clone())
            .set_recording_mode(self.recording_mode.clone())
            .build()
    }

    /// Convert from the SDK shape. Recorders without a name are skipped.
    pub(crate) fn from_sdk(recorder: &sdk::ConfigurationRecorder) -> Option<Self> {
        Some(Self {
            name: recorder.name()?.to_string(),
            role_arn: recorder.role_arn().map(str::to_string),
            recording_group: recorder.recording_group().cloned(),
            recording_mode: recorder.recording_mode().cloned(),
        })
    }
}

/// A delivery channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryChannel {
    pub name: String,
    pub s3_bucket_name: Option<String>,
    pub s3_key_prefix: Option<String>,
    pub sns_topic_arn: Option<String>,
    pub delivery_frequency: Option<DeliveryFrequency>,
    /// Unmanaged; preserved from the last describe
    pub s3_kms_key_arn: Option<String>,
}

impl DeliveryChannel {
    /// Create a channel with only its name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn to_sdk(&self) -> sdk::DeliveryChannel {
        let mut builder = sdk::DeliveryChannel::builder()
            .name(&self.name)
            .set_s3_bucket_name(self.s3_bucket_name.clone())
            .set_s3_key_prefix(self.s3_key_prefix.clone())
            .set_sns_topic_arn(self.sns_topic_arn.clone())
            .set_s3_kms_key_arn(self.s3_kms_key_arn.clone());

        if let Some(frequency) = self.delivery_frequency {
            builder = builder.config_snapshot_delivery_properties(
                sdk::ConfigSnapshotDeliveryProperties::builder()
                    .delivery_frequency(sdk::MaximumExecutionFrequency::from(frequency.as_str()))
                    .build(),
            );
        }

        builder.build()
    }

    /// Convert from the SDK shape. Channels without a name are skipped.
    pub(crate) fn from_sdk(channel: &sdk::DeliveryChannel) -> Option<Self> {
        let name = channel.name()?.to_string();
        let delivery_frequency = channel
            .config_snapshot_delivery_properties()
            .and_then(|p| p.delivery_frequency())
            .and_then(|f| match f.as_str().parse::<DeliveryFrequency>() {
                Ok(frequency) => Some(frequency),
                Err(e) => {
                    warn!(channel = %name, error = %e, "Ignoring unrecognized delivery frequency");
                    None
                }
            });

        Some(Self {
            name,
            s3_bucket_name: channel.s3_bucket_name().map(str::to_string),
            s3_key_prefix: channel.s3_key_prefix().map(str::to_string),
            sns_topic_arn: channel.sns_topic_arn().map(str::to_string),
            delivery_frequency,
            s3_kms_key_arn: channel.s3_kms_key_arn().map(str::to_string),
        })
    }
}

/// Recording status of a configuration recorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderStatus {
    pub name: String,
    pub recording: bool,
    /// Status of the last recording attempt (Pending, Success, Failure)
    pub last_status: Option<String>,
    pub last_error_code: Option<String>,
}

impl RecorderStatus {
    pub(crate) fn from_sdk(status: &sdk::ConfigurationRecorderStatus) -> Option<Self> {
        Some(Self {
            name: status.name()?.to_string(),
            recording: status.recording(),
            last_status: status.last_status().map(|s| s.as_str().to_string()),
            last_error_code: status.last_error_code().map(str::to_string),
        })
    }
}
