//! PostgreSQL implementation of [`NotifyStore`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::{AsyncDbPool, get_connection};
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{NotifyChannel, NotifyKey, NotifyPlatform};
use crate::repositories::{ChannelRepository, KeyRepository, PlatformRepository};
use crate::services::notify::{NotifyStore, SendCommit};

/// Send-pipeline store backed by the shared connection pool
#[derive(Clone)]
pub struct DieselNotifyStore {
    pool: AsyncDbPool,
    keys: KeyRepository,
    channels: ChannelRepository,
    platforms: PlatformRepository,
}

impl DieselNotifyStore {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            keys: KeyRepository::new(pool.clone()),
            channels: ChannelRepository::new(pool.clone()),
            platforms: PlatformRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl NotifyStore for DieselNotifyStore {
    async fn find_active_key(&self, api_key: &str) -> AppResult<Option<NotifyKey>> {
        self.keys.find_active_by_api_key(api_key).await
    }

    async fn find_channel(&self, channel_id: i64) -> AppResult<Option<NotifyChannel>> {
        self.channels.find_by_id(channel_id).await
    }

    async fn find_active_channels(&self, ids: &[i64]) -> AppResult<Vec<NotifyChannel>> {
        self.channels.find_active_by_ids(ids).await
    }

    async fn find_user_channels(
        &self,
        user_id: i64,
        defaults_only: bool,
    ) -> AppResult<Vec<NotifyChannel>> {
        self.channels.find_active_by_user(user_id, defaults_only).await
    }

    async fn find_platform(&self, platform_id: i64) -> AppResult<Option<NotifyPlatform>> {
        self.platforms.find_by_id(platform_id).await
    }

    async fn commit_send(&self, commit: SendCommit) -> AppResult<()> {
        use crate::schema::{notify_channel, notify_key, notify_log};

        let mut conn = get_connection(&self.pool).await?;
        let SendCommit {
            usage,
            logs,
            succeeded_channel_ids,
        } = commit;
        let log_count = logs.len();
        let succeeded = succeeded_channel_ids.len();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let key_row = notify_key::table.filter(notify_key::key_id.eq(usage.key_id));
                if usage.reset {
                    diesel::update(key_row)
                        .set((
                            notify_key::daily_used.eq(1),
                            notify_key::total_count.eq(notify_key::total_count + 1),
                            notify_key::last_reset_date.eq(usage.today),
                            notify_key::last_used_time.eq(usage.used_at),
                        ))
                        .execute(conn)
                        .await?;
                } else {
                    diesel::update(key_row)
                        .set((
                            notify_key::daily_used.eq(notify_key::daily_used + 1),
                            notify_key::total_count.eq(notify_key::total_count + 1),
                            notify_key::last_reset_date.eq(usage.today),
                            notify_key::last_used_time.eq(usage.used_at),
                        ))
                        .execute(conn)
                        .await?;
                }

                if !logs.is_empty() {
                    diesel::insert_into(notify_log::table)
                        .values(&logs)
                        .execute(conn)
                        .await?;
                }

                if !succeeded_channel_ids.is_empty() {
                    diesel::update(
                        notify_channel::table
                            .filter(notify_channel::channel_id.eq_any(&succeeded_channel_ids)),
                    )
                    .set((
                        notify_channel::use_count.eq(notify_channel::use_count + 1),
                        notify_channel::last_used_time.eq(usage.used_at),
                    ))
                    .execute(conn)
                    .await?;
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "commit send"))?;

        tracing::debug!(
            key_id = usage.key_id,
            reset = usage.reset,
            log_count,
            succeeded,
            "Send committed"
        );
        Ok(())
    }
}
