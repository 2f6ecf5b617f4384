//! awsconfig-provider - AWS Config recorder/channel resource handler
//!
//! Implements the create/read/update/delete callbacks of the `aws_config`
//! resource: an AWS Config configuration recorder and its delivery channel,
//! managed together as one logical resource.

pub mod aws;
pub mod config;
pub mod resource;
pub mod retry;
pub mod state_file;

pub use resource::{ConfigRecorderResource, ResourceError};
pub use retry::RetryPolicy;
