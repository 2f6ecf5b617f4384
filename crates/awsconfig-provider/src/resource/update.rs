//! Update callback
//!
//! Updates are expressed as two ensure steps: make the recorder's role match
//! the plan, make the channel's fields match the plan. Each step only calls
//! AWS when the remote object differs.

use super::{ConfigRecorderResource, ResourceError, channel_from_config};
use crate::aws::configservice::{ConfigServiceOperations, ConfigurationRecorder, DeliveryChannel};
use awsconfig_common::{ConfigRecorderConfig, ConfigRecorderState};
use tracing::{debug, info};

/// The recorder to put so its role matches `role_arn`, or `None` if it
/// already does.
pub fn reconcile_recorder(
    current: &ConfigurationRecorder,
    role_arn: &str,
) -> Option<ConfigurationRecorder> {
    if current.role_arn.as_deref() == Some(role_arn) {
        return None;
    }
    Some(ConfigurationRecorder {
        role_arn: Some(role_arn.to_string()),
        ..current.clone()
    })
}

/// The channel to put so its fields match `planned`, or `None` if they
/// already do. Unset planned fields clear the remote value; fields this
/// resource does not manage keep their remote value.
pub fn reconcile_channel(
    current: &DeliveryChannel,
    planned: &ConfigRecorderConfig,
) -> Option<DeliveryChannel> {
    let desired = DeliveryChannel {
        s3_kms_key_arn: current.s3_kms_key_arn.clone(),
        ..channel_from_config(&current.name, planned)
    };
    (desired != *current).then_some(desired)
}

impl<C: ConfigServiceOperations> ConfigRecorderResource<C> {
    /// Bring the remote pair in line with `planned`, then read it back.
    ///
    /// Returns `Ok(None)` if the recorder or channel no longer exists; there
    /// is nothing to update and the host should recreate the resource.
    pub async fn update(
        &self,
        id: &str,
        planned: &ConfigRecorderConfig,
    ) -> Result<Option<ConfigRecorderState>, ResourceError> {
        let role_arn = planned.validated_role_arn()?;

        let Some((recorder, channel)) = self.fetch_pair(id).await? else {
            info!(id = %id, "AWS Config recorder not found, nothing to update");
            return Ok(None);
        };

        match reconcile_recorder(&recorder, role_arn) {
            Some(desired) => {
                info!(id = %id, role_arn = %role_arn, "Updating configuration recorder role");
                self.client
                    .put_configuration_recorder(&desired)
                    .await
                    .map_err(ResourceError::UpdateRecorder)?;
            }
            None => debug!(id = %id, "Configuration recorder already up to date"),
        }

        match reconcile_channel(&channel, planned) {
            Some(desired) => {
                info!(id = %id, "Updating delivery channel");
                self.client
                    .put_delivery_channel(&desired)
                    .await
                    .map_err(ResourceError::UpdateChannel)?;
            }
            None => debug!(id = %id, "Delivery channel already up to date"),
        }

        self.read(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awsconfig_common::DeliveryFrequency;

    fn current_channel() -> DeliveryChannel {
        DeliveryChannel {
            name: "default".to_string(),
            s3_bucket_name: Some("bucket".to_string()),
            s3_key_prefix: Some("prefix".to_string()),
            sns_topic_arn: None,
            delivery_frequency: Some(DeliveryFrequency::TwentyFourHours),
            s3_kms_key_arn: Some("arn:aws:kms:us-east-2:123456789012:key/abc".to_string()),
        }
    }

    fn matching_config() -> ConfigRecorderConfig {
        ConfigRecorderConfig::new("arn:role")
            .with_s3_bucket("bucket")
            .with_s3_key_prefix("prefix")
            .with_delivery_frequency(DeliveryFrequency::TwentyFourHours)
    }

    #[test]
    fn recorder_role_change_keeps_recording_group() {
        use aws_sdk_config::types::RecordingGroup;

        let group = RecordingGroup::builder()
            .all_supported(false)
            .include_global_resource_types(false)
            .build();
        let recorder = ConfigurationRecorder {
            recording_group: Some(group.clone()),
            ..ConfigurationRecorder::new("default", "arn:old")
        };

        let desired = reconcile_recorder(&recorder, "arn:new").unwrap();
        assert_eq!(desired.recording_group, Some(group));
    }

    #[test]
    fn recorder_with_same_role_needs_no_put() {
        let recorder = ConfigurationRecorder::new("default", "arn:role");
        assert_eq!(reconcile_recorder(&recorder, "arn:role"), None);
    }

    #[test]
    fn recorder_role_change_keeps_name() {
        let recorder = ConfigurationRecorder::new("default", "arn:old");
        let desired = reconcile_recorder(&recorder, "arn:new").unwrap();
        assert_eq!(desired.name, "default");
        assert_eq!(desired.role_arn.as_deref(), Some("arn:new"));
    }

    #[test]
    fn recorder_without_role_gets_one() {
        let recorder = ConfigurationRecorder {
            role_arn: None,
            ..ConfigurationRecorder::new("default", "")
        };
        assert!(reconcile_recorder(&recorder, "arn:role").is_some());
    }

    #[test]
    fn matching_channel_needs_no_put() {
        assert_eq!(reconcile_channel(&current_channel(), &matching_config()), None);
    }

    #[test]
    fn frequency_change_overwrites_only_frequency() {
        let planned = matching_config().with_delivery_frequency(DeliveryFrequency::OneHour);
        let desired = reconcile_channel(&current_channel(), &planned).unwrap();

        assert_eq!(desired.delivery_frequency, Some(DeliveryFrequency::OneHour));
        assert_eq!(desired.s3_bucket_name.as_deref(), Some("bucket"));
        assert_eq!(desired.s3_key_prefix.as_deref(), Some("prefix"));
        assert_eq!(desired.name, "default");
        assert_eq!(desired.s3_kms_key_arn, current_channel().s3_kms_key_arn);
    }

    #[test]
    fn removed_field_is_cleared() {
        let mut planned = matching_config();
        planned.s3_key_prefix = None;
        let desired = reconcile_channel(&current_channel(), &planned).unwrap();
        assert_eq!(desired.s3_key_prefix, None);
    }
}
