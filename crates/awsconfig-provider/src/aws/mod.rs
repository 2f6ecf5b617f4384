//! AWS client modules for the provider
//!
//! This module provides wrappers around AWS SDK clients for:
//! - ConfigService: Configuration recorder and delivery channel management
//! - STS: Account ID lookup for credential validation

pub mod account;
pub mod configservice;
pub mod context;
pub mod error;

pub use account::{AccountId, get_current_account_id};
pub use configservice::{
    ConfigServiceClient, ConfigServiceOperations, ConfigurationRecorder, DeliveryChannel,
    RecorderStatus,
};
pub use context::AwsContext;
pub use error::{AwsError, classify_aws_error, classify_sdk_error};
