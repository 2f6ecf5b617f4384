//! Errors surfaced by the resource callbacks

use crate::aws::error::AwsError;
use thiserror::Error;

/// Failure of a create/read/update/delete callback.
///
/// Each remote stage has its own variant so the message says which
/// sub-resource failed. "Not found" is never an error here; lookups report
/// absence as `None`.
///
/// The underlying error is part of each message rather than a separate
/// `source()`, so an error chain prints it once.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Configuration rejected before any remote call
    #[error("invalid aws_config configuration: {0}")]
    Validation(garde::Report),

    #[error("Failed to create ConfigurationRecorder: {0}")]
    CreateRecorder(AwsError),

    #[error("Failed to create DeliveryChannel: {0}")]
    CreateChannel(AwsError),

    #[error("Error starting ConfigurationRecorder: {0}")]
    StartRecorder(AwsError),

    #[error("Failed to update ConfigurationRecorder: {0}")]
    UpdateRecorder(AwsError),

    #[error("Failed to update DeliveryChannel: {0}")]
    UpdateChannel(AwsError),

    #[error("Failed to retrieve information about Config recorder: {0}")]
    DescribeRecorder(AwsError),

    #[error("Failed to retrieve information about delivery channel: {0}")]
    DescribeChannel(AwsError),

    #[error("Error stopping configuration recording: {0}")]
    StopRecorder(AwsError),

    /// Delivery channel deletion failed; the AWS error is reported as is
    #[error(transparent)]
    DeleteChannel(AwsError),

    /// The pair was created but could not be read back
    #[error("Config recorder {id:?} was not found right after it was created")]
    Vanished { id: String },
}

impl From<garde::Report> for ResourceError {
    fn from(report: garde::Report) -> Self {
        ResourceError::Validation(report)
    }
}

impl ResourceError {
    /// The AWS error behind this failure, if it came from a remote call
    pub fn aws_error(&self) -> Option<&AwsError> {
        match self {
            ResourceError::CreateRecorder(e)
            | ResourceError::CreateChannel(e)
            | ResourceError::StartRecorder(e)
            | ResourceError::UpdateRecorder(e)
            | ResourceError::UpdateChannel(e)
            | ResourceError::DescribeRecorder(e)
            | ResourceError::DescribeChannel(e)
            | ResourceError::StopRecorder(e)
            | ResourceError::DeleteChannel(e) => Some(e),
            ResourceError::Validation(_) | ResourceError::Vanished { .. } => None,
        }
    }

    /// Check if the configuration was rejected before any remote call
    pub fn is_validation(&self) -> bool {
        matches!(self, ResourceError::Validation(_))
    }
}
