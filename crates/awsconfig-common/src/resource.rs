//! Desired configuration and observed state of the `aws_config` resource
//!
//! The host hands the provider a [`ConfigRecorderConfig`] (what the user
//! asked for) and stores the [`ConfigRecorderState`] the provider returns
//! (what AWS reported after the last operation).

use crate::frequency::DeliveryFrequency;
use serde::{Deserialize, Serialize};

/// User-supplied attributes of the resource
///
/// Validation is done via `garde::Validate`. `role_arn` is optional at the
/// type level so a missing value can be reported as a validation error
/// instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, garde::Validate)]
#[serde(deny_unknown_fields)]
pub struct ConfigRecorderConfig {
    /// IAM role AWS Config assumes to read resource configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(required, length(min = 1))]
    pub role_arn: Option<String>,

    /// Snapshot delivery frequency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub delivery_frequency: Option<DeliveryFrequency>,

    /// Bucket receiving configuration snapshots and history files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub s3_bucket_name: Option<String>,

    /// Key prefix inside the bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub s3_key_prefix: Option<String>,

    /// SNS topic notified on configuration changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub sns_topic_arn: Option<String>,
}

impl ConfigRecorderConfig {
    /// Create a configuration with only the required role set
    pub fn new(role_arn: impl Into<String>) -> Self {
        Self {
            role_arn: Some(role_arn.into()),
            ..Default::default()
        }
    }

    /// Set the delivery frequency
    pub fn with_delivery_frequency(mut self, frequency: DeliveryFrequency) -> Self {
        self.delivery_frequency = Some(frequency);
        self
    }

    /// Set the S3 bucket name
    pub fn with_s3_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.s3_bucket_name = Some(bucket.into());
        self
    }

    /// Set the S3 key prefix
    pub fn with_s3_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.s3_key_prefix = Some(prefix.into());
        self
    }

    /// Set the SNS topic ARN
    pub fn with_sns_topic(mut self, topic_arn: impl Into<String>) -> Self {
        self.sns_topic_arn = Some(topic_arn.into());
        self
    }

    /// Validate the configuration and return the role ARN.
    pub fn validated_role_arn(&self) -> Result<&str, garde::Report> {
        use garde::Validate;

        self.validate()?;
        Ok(self.role_arn.as_deref().unwrap_or_default())
    }
}

/// State recorded after a successful create, read or update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecorderState {
    /// Identifier under which the pair is tracked (always the fixed name)
    pub id: String,

    /// Recorder name as reported by AWS
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_frequency: Option<DeliveryFrequency>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_bucket_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_key_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sns_topic_arn: Option<String>,
}

impl ConfigRecorderState {
    /// The user-facing attributes of this state, for comparison with a config
    pub fn attributes(&self) -> ConfigRecorderConfig {
        ConfigRecorderConfig {
            role_arn: self.role_arn.clone(),
            delivery_frequency: self.delivery_frequency,
            s3_bucket_name: self.s3_bucket_name.clone(),
            s3_key_prefix: self.s3_key_prefix.clone(),
            sns_topic_arn: self.sns_topic_arn.clone(),
        }
    }
}
