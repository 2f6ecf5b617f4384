//! Declarative attribute schema of the `aws_config` resource
//!
//! The host orchestrator reads this to know which attributes are required,
//! optional or computed, and which values an enumerated attribute accepts.
//!
//! | Attribute | Kind | Constraint |
//! |-----------|------|------------|
//! | `id` | computed | always `default` |
//! | `name` | computed | always `default` |
//! | `role_arn` | required | non-empty |
//! | `delivery_frequency` | optional | one of [`DeliveryFrequency::VALID_VALUES`] |
//! | `s3_bucket_name` | optional | |
//! | `s3_key_prefix` | optional | |
//! | `sns_topic_arn` | optional | |

use crate::defaults::RESOURCE_TYPE;
use crate::frequency::DeliveryFrequency;
use serde::Serialize;

/// Whether an attribute is supplied by the user or filled in by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Required,
    Optional,
    Computed,
}

/// One attribute of the resource schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<&'static [&'static str]>,
}

/// Schema of a resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
    pub resource_type: &'static str,
    pub attributes: Vec<AttributeSchema>,
}

impl ResourceSchema {
    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Names of the attributes the user must set
    pub fn required(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes
            .iter()
            .filter(|a| a.kind == AttributeKind::Required)
            .map(|a| a.name)
    }

    /// Check a single user-supplied attribute value against its constraint.
    ///
    /// Returns the error message the host should show when the value is
    /// rejected.
    pub fn validate_attribute(&self, name: &str, value: &str) -> Result<(), String> {
        let attr = self
            .attribute(name)
            .ok_or_else(|| format!("unknown attribute {name:?} for {}", self.resource_type))?;

        match attr.kind {
            AttributeKind::Computed => Err(format!("{name:?} is computed and cannot be set")),
            AttributeKind::Required if value.is_empty() => {
                Err(format!("{name:?} is required and cannot be empty"))
            }
            _ if name == "delivery_frequency" => value
                .parse::<DeliveryFrequency>()
                .map(|_| ())
                .map_err(|e| e.to_string()),
            _ => Ok(()),
        }
    }
}

/// Build the schema of the `aws_config` resource.
pub fn resource_schema() -> ResourceSchema {
    ResourceSchema {
        resource_type: RESOURCE_TYPE,
        attributes: vec![
            AttributeSchema {
                name: "id",
                kind: AttributeKind::Computed,
                description: "Identifier of the recorder/channel pair",
                allowed_values: None,
            },
            AttributeSchema {
                name: "name",
                kind: AttributeKind::Computed,
                description: "Name of the configuration recorder and delivery channel",
                allowed_values: None,
            },
            AttributeSchema {
                name: "role_arn",
                kind: AttributeKind::Required,
                description: "IAM role AWS Config assumes to record resource configuration",
                allowed_values: None,
            },
            AttributeSchema {
                name: "delivery_frequency",
                kind: AttributeKind::Optional,
                description: "How often configuration snapshots are delivered",
                allowed_values: Some(DeliveryFrequency::VALID_VALUES),
            },
            AttributeSchema {
                name: "s3_bucket_name",
                kind: AttributeKind::Optional,
                description: "S3 bucket receiving snapshots and history files",
                allowed_values: None,
            },
            AttributeSchema {
                name: "s3_key_prefix",
                kind: AttributeKind::Optional,
                description: "Key prefix for objects written to the bucket",
                allowed_values: None,
            },
            AttributeSchema {
                name: "sns_topic_arn",
                kind: AttributeKind::Optional,
                description: "SNS topic notified of configuration changes",
                allowed_values: None,
            },
        ],
    }
}
