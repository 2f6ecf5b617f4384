//! awsconfig-common - Shared types for the `aws_config` resource handler
//!
//! This crate holds the value types shared by the provider and its test
//! utilities, without any AWS SDK dependencies to keep it lightweight.
//!
//! ## Modules
//!
//! - [`defaults`]: Fixed names and default configuration values
//! - [`frequency`]: Delivery frequency literals accepted by AWS Config
//! - [`resource`]: Desired configuration and observed state of the resource
//! - [`schema`]: Declarative attribute schema consumed by the host

pub mod defaults;
pub mod frequency;
pub mod resource;
pub mod schema;

// Re-export commonly used types
pub use frequency::{DeliveryFrequency, InvalidDeliveryFrequency};
pub use resource::{ConfigRecorderConfig, ConfigRecorderState};
pub use schema::{AttributeKind, AttributeSchema, ResourceSchema, resource_schema};
