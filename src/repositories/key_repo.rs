//! API key repository for async database operations.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::contains_pattern;
use crate::db::{AsyncDbPool, get_connection};
use crate::error::{AppError, AppResult};
use crate::models::{NewNotifyKey, NotifyKey, NotifyKeyFilter, RecordStatus, UpdateNotifyKey};
use crate::schema::notify_key;

/// API key repository
#[derive(Clone)]
pub struct KeyRepository {
    pool: AsyncDbPool,
}

impl KeyRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_key: NewNotifyKey) -> AppResult<NotifyKey> {
        use crate::schema::notify_key::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        diesel::insert_into(notify_key)
            .values(&new_key)
            .returning(NotifyKey::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<NotifyKey>> {
        use crate::schema::notify_key::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        notify_key
            .filter(key_id.eq(id))
            .select(NotifyKey::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds an active key by its raw string; expiry is checked by the caller
    pub async fn find_active_by_api_key(&self, raw_key: &str) -> AppResult<Option<NotifyKey>> {
        use crate::schema::notify_key::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        notify_key
            .filter(api_key.eq(raw_key))
            .filter(status.eq(RecordStatus::Active))
            .select(NotifyKey::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds a user's keys matching `filter`, newest first
    ///
    /// # Returns
    /// Tuple of (keys vector, total count)
    pub async fn find_filtered(
        &self,
        filter: &NotifyKeyFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<NotifyKey>, i64)> {
        use crate::schema::notify_key::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        let keys = filtered_query(filter)
            .order(key_id.desc())
            .offset(offset)
            .limit(limit)
            .select(NotifyKey::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)?;

        let total = filtered_query(filter)
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok((keys, total))
    }

    pub async fn update(&self, id: i64, update_data: UpdateNotifyKey) -> AppResult<NotifyKey> {
        use crate::schema::notify_key::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        diesel::update(notify_key.filter(key_id.eq(id)))
            .set(&update_data)
            .returning(NotifyKey::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes every key in `ids`
    ///
    /// # Returns
    /// Number of rows affected
    pub async fn delete_many(&self, ids: &[i64]) -> AppResult<usize> {
        use crate::schema::notify_key::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        diesel::delete(notify_key.filter(key_id.eq_any(ids)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

fn filtered_query(filter: &NotifyKeyFilter) -> notify_key::BoxedQuery<'static, Pg> {
    use crate::schema::notify_key::dsl::*;

    let mut query = notify_key.filter(user_id.eq(filter.user_id)).into_boxed();
    if let Some(name) = filter.key_name.as_deref().filter(|n| !n.is_empty()) {
        query = query.filter(key_name.like(contains_pattern(name)));
    }
    if let Some(s) = filter.status {
        query = query.filter(status.eq(s));
    }
    query
}
