//! AWS error classification and handling
//!
//! Provides typed errors for ConfigService operations using the error code
//! reported by the SDK instead of string matching on the Debug format.

use aws_sdk_config::error::{DisplayErrorContext, ProvideErrorMetadata};
use thiserror::Error;

/// Error code returned while the S3 bucket or SNS topic policy has not yet
/// propagated to AWS Config. Only the delivery channel put retries on it.
pub const DELIVERY_POLICY_PENDING_CODE: &str = "InsufficientDeliveryPolicyException";

/// AWS error categories for retry and lookup logic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AwsError {
    /// Recorder or channel does not exist (a soft signal for lookups)
    #[error("Resource not found: {code}")]
    NotFound { code: String, message: String },

    /// Bucket or topic policy not yet visible to AWS Config (retryable on create)
    #[error("InsufficientDeliveryPolicyException: {message}")]
    DeliveryPolicyPending { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    Throttled { message: String },

    /// The role cannot be assumed or lacks permissions
    #[error("{code}: {message}")]
    InvalidRole { code: String, message: String },

    /// Generic AWS SDK error with code and message
    #[error("{}: {message}", code.as_deref().unwrap_or("AWS error"))]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Get the AWS error code, if one was reported
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::NotFound { code, .. } | AwsError::InvalidRole { code, .. } => Some(code),
            AwsError::DeliveryPolicyPending { .. } => Some(DELIVERY_POLICY_PENDING_CODE),
            AwsError::Throttled { .. } => Some("ThrottlingException"),
            AwsError::Sdk { code, .. } => code.as_deref(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }

    /// Check if this is the transient delivery policy error
    pub fn is_delivery_policy_pending(&self) -> bool {
        matches!(self, AwsError::DeliveryPolicyPending { .. })
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        self.code().and_then(suggestion_for_code)
    }
}

/// Known ConfigService error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &[
    "NoSuchConfigurationRecorderException",
    "NoSuchDeliveryChannelException",
];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Known ConfigService error codes for unusable roles
const INVALID_ROLE_CODES: &[&str] = &["InvalidRoleException", "InsufficientPermissionsException"];

/// Classify an AWS error using its code and message.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound {
            code: c.to_string(),
            message,
        },
        Some(DELIVERY_POLICY_PENDING_CODE) => AwsError::DeliveryPolicyPending { message },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled { message },
        Some(c) if INVALID_ROLE_CODES.contains(&c) => AwsError::InvalidRole {
            code: c.to_string(),
            message,
        },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify an SDK operation error.
///
/// Service errors carry a code and message through `ProvideErrorMetadata`.
/// Transport failures carry neither, so the full error context is used as
/// the message.
pub fn classify_sdk_error<E>(error: &E) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let meta = ProvideErrorMetadata::meta(error);
    match meta.message() {
        Some(message) => classify_aws_error(meta.code(), Some(message)),
        None => {
            let context = DisplayErrorContext(error).to_string();
            classify_aws_error(meta.code(), Some(&context))
        }
    }
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        DELIVERY_POLICY_PENDING_CODE,
        "Check that the S3 bucket policy and SNS topic policy allow AWS Config to write to them.",
    ),
    (
        "NoSuchBucketException",
        "The delivery channel bucket does not exist. Create it before applying.",
    ),
    (
        "InvalidRoleException",
        "The role must trust config.amazonaws.com and exist in this account.",
    ),
    (
        "InsufficientPermissionsException",
        "Grant the role read access to the resources AWS Config records.",
    ),
    (
        "MaxNumberOfConfigurationRecordersExceededException",
        "Only one configuration recorder is allowed per account and region.",
    ),
    (
        "MaxNumberOfDeliveryChannelsExceededException",
        "Only one delivery channel is allowed per account and region.",
    ),
    (
        "NoAvailableConfigurationRecorderException",
        "Create the configuration recorder before the delivery channel.",
    ),
    (
        "NoAvailableDeliveryChannelException",
        "A delivery channel must exist before recording can start.",
    ),
    (
        "LastDeliveryChannelDeleteFailedException",
        "Stop the configuration recorder before deleting the delivery channel.",
    ),
    (
        "ThrottlingException",
        "AWS API rate limit hit. Retry the operation later.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<&'static str> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| *s)
}
