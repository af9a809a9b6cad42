//! Read and delete access to send logs.

use crate::error::{AppError, AppResult};
use crate::models::{NotifyLog, NotifyLogFilter};
use crate::repositories::LogRepository;

#[derive(Clone)]
pub struct LogService {
    repo: LogRepository,
}

impl LogService {
    pub fn new(repo: LogRepository) -> Self {
        Self { repo }
    }

    /// Lists logs matching `filter`, newest first.
    ///
    /// # Returns
    /// A tuple of (logs, total_count)
    pub async fn list_logs(
        &self,
        filter: &NotifyLogFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<NotifyLog>, i64)> {
        self.repo.find_filtered(filter, offset, limit).await
    }

    pub async fn get_log(&self, user_id: i64, id: i64) -> AppResult<NotifyLog> {
        let log = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("notify_log", id))?;

        if log.user_id != user_id {
            return Err(AppError::Forbidden {
                message: "You don't have permission to access this log".to_string(),
            });
        }
        Ok(log)
    }

    /// Deletes the listed logs once every one is found and owned by `user_id`.
    pub async fn delete_logs(&self, user_id: i64, ids: &[i64]) -> AppResult<usize> {
        for id in ids {
            self.get_log(user_id, *id).await?;
        }
        let affected = self.repo.delete_many(ids).await?;
        tracing::info!(user_id, deleted = affected, "Send logs deleted");
        Ok(affected)
    }
}
