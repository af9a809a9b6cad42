//! Platform repository for async database operations.
//!
//! Provides filtered listing and CRUD operations for the notify_platform table.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::contains_pattern;
use crate::db::{AsyncDbPool, get_connection};
use crate::error::{AppError, AppResult};
use crate::models::{
    NewNotifyPlatform, NotifyPlatform, NotifyPlatformFilter, UpdateNotifyPlatform,
};
use crate::schema::notify_platform;

/// Platform repository
#[derive(Clone)]
pub struct PlatformRepository {
    pool: AsyncDbPool,
}

impl PlatformRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Finds platforms matching `filter`, ordered by `order_num`, then id
    ///
    /// # Returns
    /// Tuple of (platforms vector, total count)
    pub async fn find_filtered(
        &self,
        filter: &NotifyPlatformFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<NotifyPlatform>, i64)> {
        use crate::schema::notify_platform::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        let platforms = filtered_query(filter)
            .order((order_num.asc(), platform_id.asc()))
            .offset(offset)
            .limit(limit)
            .select(NotifyPlatform::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)?;

        let total = filtered_query(filter)
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok((platforms, total))
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<NotifyPlatform>> {
        use crate::schema::notify_platform::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        notify_platform
            .filter(platform_id.eq(id))
            .select(NotifyPlatform::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn create(&self, new_platform: NewNotifyPlatform) -> AppResult<NotifyPlatform> {
        use crate::schema::notify_platform::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        diesel::insert_into(notify_platform)
            .values(&new_platform)
            .returning(NotifyPlatform::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update(
        &self,
        id: i64,
        update_data: UpdateNotifyPlatform,
    ) -> AppResult<NotifyPlatform> {
        use crate::schema::notify_platform::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        diesel::update(notify_platform.filter(platform_id.eq(id)))
            .set(&update_data)
            .returning(NotifyPlatform::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes every platform in `ids`
    ///
    /// # Returns
    /// Number of rows affected
    pub async fn delete_many(&self, ids: &[i64]) -> AppResult<usize> {
        use crate::schema::notify_platform::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        diesel::delete(notify_platform.filter(platform_id.eq_any(ids)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

fn filtered_query(filter: &NotifyPlatformFilter) -> notify_platform::BoxedQuery<'static, Pg> {
    use crate::schema::notify_platform::dsl::*;

    let mut query = notify_platform.into_boxed();
    if let Some(name) = filter.platform_name.as_deref().filter(|n| !n.is_empty()) {
        query = query.filter(platform_name.like(contains_pattern(name)));
    }
    if let Some(code) = filter.platform_code.as_deref().filter(|c| !c.is_empty()) {
        query = query.filter(platform_code.like(contains_pattern(code)));
    }
    if let Some(s) = filter.status {
        query = query.filter(status.eq(s));
    }
    query
}
