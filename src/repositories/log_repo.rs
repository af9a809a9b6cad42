//! Send log repository.
//!
//! Rows are inserted by the send commit (see `DieselNotifyStore`); this
//! repository reads them back and removes them.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::contains_pattern;
use crate::db::{AsyncDbPool, get_connection};
use crate::error::{AppError, AppResult};
use crate::models::{NotifyLog, NotifyLogFilter};
use crate::schema::notify_log;

/// Send log repository
#[derive(Clone)]
pub struct LogRepository {
    pool: AsyncDbPool,
}

impl LogRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<NotifyLog>> {
        use crate::schema::notify_log::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        notify_log
            .filter(log_id.eq(id))
            .select(NotifyLog::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds logs matching `filter`, newest first
    ///
    /// # Returns
    /// Tuple of (logs vector, total count)
    pub async fn find_filtered(
        &self,
        filter: &NotifyLogFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<NotifyLog>, i64)> {
        use crate::schema::notify_log::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        let logs = filtered_query(filter)
            .order(log_id.desc())
            .offset(offset)
            .limit(limit)
            .select(NotifyLog::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)?;

        let total = filtered_query(filter)
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok((logs, total))
    }

    /// Deletes every log in `ids`
    ///
    /// # Returns
    /// Number of rows affected
    pub async fn delete_many(&self, ids: &[i64]) -> AppResult<usize> {
        use crate::schema::notify_log::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        diesel::delete(notify_log.filter(log_id.eq_any(ids)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

fn filtered_query(filter: &NotifyLogFilter) -> notify_log::BoxedQuery<'static, Pg> {
    use crate::schema::notify_log::dsl::*;

    let mut query = notify_log.filter(user_id.eq(filter.user_id)).into_boxed();
    if let Some(kid) = filter.key_id {
        query = query.filter(key_id.eq(kid));
    }
    if let Some(cid) = filter.channel_id {
        query = query.filter(channel_id.eq(cid));
    }
    if let Some(pid) = filter.platform_id {
        query = query.filter(platform_id.eq(pid));
    }
    if let Some(t) = filter.title.as_deref().filter(|t| !t.is_empty()) {
        query = query.filter(title.like(contains_pattern(t)));
    }
    if let Some(m) = filter.msg_type.as_deref().filter(|m| !m.is_empty()) {
        query = query.filter(msg_type.eq(m.to_string()));
    }
    if let Some(s) = filter.status {
        query = query.filter(status.eq(s));
    }
    query
}
