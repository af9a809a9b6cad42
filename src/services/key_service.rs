//! API key issuance and management.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{
    NewNotifyKey, NotifyKey, NotifyKeyFilter, RecordStatus, UpdateNotifyKey, parse_channel_ids,
};
use crate::repositories::{ChannelRepository, KeyRepository};
use crate::services::notify::generate_api_key;
use crate::utils::clock::Clock;

/// Fields a user supplies when generating a key.
#[derive(Debug, Clone, Default)]
pub struct KeyDraft {
    pub key_name: String,
    pub channel_ids: Vec<i64>,
    pub daily_limit: Option<i32>,
    pub expire_time: Option<chrono::NaiveDateTime>,
    pub remark: Option<String>,
}

/// API key service; every operation is scoped to the calling user.
#[derive(Clone)]
pub struct KeyService {
    keys: KeyRepository,
    channels: ChannelRepository,
    clock: Arc<dyn Clock>,
    default_daily_limit: i32,
}

impl KeyService {
    pub fn new(
        keys: KeyRepository,
        channels: ChannelRepository,
        clock: Arc<dyn Clock>,
        default_daily_limit: i32,
    ) -> Self {
        Self {
            keys,
            channels,
            clock,
            default_daily_limit,
        }
    }

    /// Lists the caller's keys matching `filter`, newest first.
    ///
    /// # Returns
    /// A tuple of (keys, total_count)
    pub async fn list_keys(
        &self,
        filter: &NotifyKeyFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<NotifyKey>, i64)> {
        self.keys.find_filtered(filter, offset, limit).await
    }

    /// Gets a key owned by `user_id`.
    ///
    /// # Returns
    /// `NotFound` if missing, `Forbidden` if it belongs to someone else
    pub async fn get_key(&self, user_id: i64, id: i64) -> AppResult<NotifyKey> {
        let key = self
            .keys
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("notify_key", id))?;

        if key.user_id != user_id {
            return Err(AppError::Forbidden {
                message: "You don't have permission to access this key".to_string(),
            });
        }
        Ok(key)
    }

    /// Creates a key with a freshly generated secret and returns it.
    pub async fn generate_key(&self, user_id: i64, draft: KeyDraft) -> AppResult<NotifyKey> {
        self.ensure_owned_channels(user_id, &draft.channel_ids).await?;

        let new_key = NewNotifyKey {
            user_id,
            key_name: draft.key_name,
            api_key: generate_api_key(),
            channel_ids: join_channel_ids(&draft.channel_ids),
            daily_limit: draft.daily_limit.unwrap_or(self.default_daily_limit),
            daily_used: 0,
            total_count: 0,
            status: RecordStatus::Active,
            expire_time: draft.expire_time,
            create_by: Some(user_id.to_string()),
            create_time: Some(self.clock.now()),
            remark: draft.remark,
        };

        let key = self.keys.create(new_key).await?;
        tracing::info!(key_id = key.key_id, user_id, "API key generated");
        Ok(key)
    }

    pub async fn update_key(
        &self,
        user_id: i64,
        id: i64,
        mut update_data: UpdateNotifyKey,
    ) -> AppResult<NotifyKey> {
        self.get_key(user_id, id).await?;
        if let Some(Some(bound)) = &update_data.channel_ids {
            let ids = parse_channel_ids(bound);
            self.ensure_owned_channels(user_id, &ids).await?;
            update_data.channel_ids = Some(join_channel_ids(&ids));
        }

        // The secret only changes through `reset_key`.
        update_data.api_key = None;
        update_data.update_by = Some(user_id.to_string());
        update_data.update_time = Some(self.clock.now());
        self.keys.update(id, update_data).await
    }

    /// Replaces the key's secret; the old string stops working immediately.
    pub async fn reset_key(&self, user_id: i64, id: i64) -> AppResult<NotifyKey> {
        self.get_key(user_id, id).await?;

        let update_data = UpdateNotifyKey {
            api_key: Some(generate_api_key()),
            update_by: Some(user_id.to_string()),
            update_time: Some(self.clock.now()),
            ..Default::default()
        };
        let key = self.keys.update(id, update_data).await?;
        tracing::info!(key_id = id, user_id, "API key reset");
        Ok(key)
    }

    /// Deletes the listed keys once every one is found and owned by `user_id`.
    pub async fn delete_keys(&self, user_id: i64, ids: &[i64]) -> AppResult<usize> {
        for id in ids {
            self.get_key(user_id, *id).await?;
        }
        let affected = self.keys.delete_many(ids).await?;
        tracing::info!(user_id, deleted = affected, "API keys deleted");
        Ok(affected)
    }

    async fn ensure_owned_channels(&self, user_id: i64, ids: &[i64]) -> AppResult<()> {
        let owned = self.channels.find_owned_ids(user_id, ids).await?;
        if let Some(foreign) = ids.iter().find(|id| !owned.contains(*id)) {
            return Err(AppError::Validation {
                field: "channel_ids".to_string(),
                reason: format!("Channel {} does not exist", foreign),
            });
        }
        Ok(())
    }
}

/// Comma-joins bound channel ids; no ids means no binding.
pub fn join_channel_ids(ids: &[i64]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    Some(
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(","),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_channel_ids() {
        assert_eq!(join_channel_ids(&[]), None);
        assert_eq!(join_channel_ids(&[3, 1, 2]), Some("3,1,2".to_string()));
        assert_eq!(
            parse_channel_ids(&join_channel_ids(&[5, 6]).unwrap()),
            vec![5, 6]
        );
    }
}
