//! Delete callback

use super::{ConfigRecorderResource, ResourceError};
use crate::aws::configservice::ConfigServiceOperations;
use tracing::info;

impl<C: ConfigServiceOperations> ConfigRecorderResource<C> {
    /// Stop recording, then delete the delivery channel.
    ///
    /// AWS Config refuses to delete the channel while the recorder is
    /// running, so the order matters. A missing recorder or channel means
    /// there is nothing left to do. The recorder itself is kept; AWS Config
    /// keeps one per region and re-puts replace it.
    pub async fn delete(&self, id: &str) -> Result<(), ResourceError> {
        if self.find_recorder(id).await?.is_none() {
            info!(id = %id, "AWS Config recorder already gone");
            return Ok(());
        }

        self.client
            .stop_configuration_recorder(id)
            .await
            .map_err(ResourceError::StopRecorder)?;

        if self.find_channel(id).await?.is_none() {
            info!(id = %id, "Delivery channel already gone");
            return Ok(());
        }

        self.client
            .delete_delivery_channel(id)
            .await
            .map_err(ResourceError::DeleteChannel)?;

        info!(id = %id, "AWS Config recording stopped and delivery channel deleted");
        Ok(())
    }
}
