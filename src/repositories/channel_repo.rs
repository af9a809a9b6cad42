//! Channel repository for async database operations.
//!
//! Provides CRUD operations for the notify_channel table plus the lookups
//! used by channel resolution.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{AsyncDbPool, get_connection};
use crate::error::{AppError, AppResult};
use crate::models::{
    DefaultFlag, NewNotifyChannel, NotifyChannel, RecordStatus, UpdateNotifyChannel,
};

/// Channel repository
#[derive(Clone)]
pub struct ChannelRepository {
    pool: AsyncDbPool,
}

impl ChannelRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new channel
    ///
    /// # Returns
    /// The created channel with generated id
    pub async fn create(&self, new_channel: NewNotifyChannel) -> AppResult<NotifyChannel> {
        use crate::schema::notify_channel::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        diesel::insert_into(notify_channel)
            .values(&new_channel)
            .returning(NotifyChannel::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a channel by ID regardless of owner or status
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<NotifyChannel>> {
        use crate::schema::notify_channel::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        notify_channel
            .filter(channel_id.eq(id))
            .select(NotifyChannel::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists a user's channels with pagination
    ///
    /// # Returns
    /// Tuple of (channels vector, total count)
    pub async fn find_by_user_id(
        &self,
        uid: i64,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<NotifyChannel>, i64)> {
        use crate::schema::notify_channel::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        let channels = notify_channel
            .filter(user_id.eq(uid))
            .order(channel_id.asc())
            .offset(offset)
            .limit(limit)
            .select(NotifyChannel::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)?;

        let total = notify_channel
            .filter(user_id.eq(uid))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok((channels, total))
    }

    /// Active channels among `ids`, ordered by id
    pub async fn find_active_by_ids(&self, ids: &[i64]) -> AppResult<Vec<NotifyChannel>> {
        use crate::schema::notify_channel::dsl::*;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = get_connection(&self.pool).await?;

        notify_channel
            .filter(channel_id.eq_any(ids))
            .filter(status.eq(RecordStatus::Active))
            .order(channel_id.asc())
            .select(NotifyChannel::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Ids among `ids` that belong to `uid`, whatever their status
    pub async fn find_owned_ids(&self, uid: i64, ids: &[i64]) -> AppResult<Vec<i64>> {
        use crate::schema::notify_channel::dsl::*;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = get_connection(&self.pool).await?;

        notify_channel
            .filter(user_id.eq(uid))
            .filter(channel_id.eq_any(ids))
            .select(channel_id)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Active channels of `uid`, optionally restricted to default ones
    pub async fn find_active_by_user(
        &self,
        uid: i64,
        defaults_only: bool,
    ) -> AppResult<Vec<NotifyChannel>> {
        use crate::schema::notify_channel::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        let mut query = notify_channel
            .filter(user_id.eq(uid))
            .filter(status.eq(RecordStatus::Active))
            .into_boxed();
        if defaults_only {
            query = query.filter(is_default.eq(DefaultFlag::Yes));
        }

        query
            .order(channel_id.asc())
            .select(NotifyChannel::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update(
        &self,
        id: i64,
        update_data: UpdateNotifyChannel,
    ) -> AppResult<NotifyChannel> {
        use crate::schema::notify_channel::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        diesel::update(notify_channel.filter(channel_id.eq(id)))
            .set(&update_data)
            .returning(NotifyChannel::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes every channel in `ids`
    ///
    /// # Returns
    /// Number of rows affected
    pub async fn delete_many(&self, ids: &[i64]) -> AppResult<usize> {
        use crate::schema::notify_channel::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        diesel::delete(notify_channel.filter(channel_id.eq_any(ids)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
