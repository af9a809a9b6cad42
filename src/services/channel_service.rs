//! Channel management for the owning user.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{NewNotifyChannel, NotifyChannel, UpdateNotifyChannel};
use crate::repositories::{ChannelRepository, PlatformRepository};
use crate::utils::clock::Clock;

/// Channel service; every operation is scoped to the calling user.
#[derive(Clone)]
pub struct ChannelService {
    channels: ChannelRepository,
    platforms: PlatformRepository,
    clock: Arc<dyn Clock>,
}

impl ChannelService {
    pub fn new(
        channels: ChannelRepository,
        platforms: PlatformRepository,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            channels,
            platforms,
            clock,
        }
    }

    /// Lists a user's channels with pagination.
    ///
    /// # Returns
    /// A tuple of (channels, total_count)
    pub async fn list_channels(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<NotifyChannel>, i64)> {
        self.channels.find_by_user_id(user_id, offset, limit).await
    }

    /// Gets a channel owned by `user_id`.
    ///
    /// # Returns
    /// `NotFound` if missing, `Forbidden` if it belongs to someone else
    pub async fn get_channel(&self, user_id: i64, id: i64) -> AppResult<NotifyChannel> {
        let channel = self
            .channels
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("notify_channel", id))?;

        if channel.user_id != user_id {
            return Err(AppError::Forbidden {
                message: "You don't have permission to access this channel".to_string(),
            });
        }
        Ok(channel)
    }

    pub async fn create_channel(&self, mut new_channel: NewNotifyChannel) -> AppResult<NotifyChannel> {
        self.ensure_platform(new_channel.platform_id).await?;

        new_channel.create_by = Some(new_channel.user_id.to_string());
        new_channel.create_time = Some(self.clock.now());

        let channel = self.channels.create(new_channel).await?;
        tracing::info!(
            channel_id = channel.channel_id,
            user_id = channel.user_id,
            platform_id = channel.platform_id,
            "Channel created"
        );
        Ok(channel)
    }

    pub async fn update_channel(
        &self,
        user_id: i64,
        id: i64,
        mut update_data: UpdateNotifyChannel,
    ) -> AppResult<NotifyChannel> {
        self.get_channel(user_id, id).await?;
        if let Some(platform_id) = update_data.platform_id {
            self.ensure_platform(platform_id).await?;
        }

        update_data.update_by = Some(user_id.to_string());
        update_data.update_time = Some(self.clock.now());
        self.channels.update(id, update_data).await
    }

    /// Deletes the listed channels once every one is found and owned by `user_id`.
    pub async fn delete_channels(&self, user_id: i64, ids: &[i64]) -> AppResult<usize> {
        for id in ids {
            self.get_channel(user_id, *id).await?;
        }
        let affected = self.channels.delete_many(ids).await?;
        tracing::info!(user_id, deleted = affected, "Channels deleted");
        Ok(affected)
    }

    async fn ensure_platform(&self, platform_id: i64) -> AppResult<()> {
        if self.platforms.find_by_id(platform_id).await?.is_none() {
            return Err(AppError::Validation {
                field: "platform_id".to_string(),
                reason: format!("Platform {} does not exist", platform_id),
            });
        }
        Ok(())
    }
}
