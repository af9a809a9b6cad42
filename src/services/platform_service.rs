//! Platform management.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{
    NewNotifyPlatform, NotifyPlatform, NotifyPlatformFilter, UpdateNotifyPlatform,
};
use crate::repositories::PlatformRepository;
use crate::utils::clock::Clock;

/// Service for the shared webhook platform definitions.
#[derive(Clone)]
pub struct PlatformService {
    repo: PlatformRepository,
    clock: Arc<dyn Clock>,
}

impl PlatformService {
    pub fn new(repo: PlatformRepository, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Lists platforms matching `filter`, ordered by `order_num`.
    ///
    /// # Returns
    /// A tuple of (platforms, total_count)
    pub async fn list_platforms(
        &self,
        filter: &NotifyPlatformFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<NotifyPlatform>, i64)> {
        self.repo.find_filtered(filter, offset, limit).await
    }

    /// Gets a platform by ID.
    ///
    /// # Returns
    /// The platform if found, or `NotFound` error
    pub async fn get_platform(&self, id: i64) -> AppResult<NotifyPlatform> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("notify_platform", id))
    }

    pub async fn create_platform(
        &self,
        mut new_platform: NewNotifyPlatform,
        operator: &str,
    ) -> AppResult<NotifyPlatform> {
        new_platform.create_by = Some(operator.to_string());
        new_platform.create_time = Some(self.clock.now());

        let platform = self.repo.create(new_platform).await?;
        tracing::info!(
            platform_id = platform.platform_id,
            platform_code = %platform.platform_code,
            "Platform created"
        );
        Ok(platform)
    }

    pub async fn update_platform(
        &self,
        id: i64,
        mut update_data: UpdateNotifyPlatform,
        operator: &str,
    ) -> AppResult<NotifyPlatform> {
        self.get_platform(id).await?;

        update_data.update_by = Some(operator.to_string());
        update_data.update_time = Some(self.clock.now());
        self.repo.update(id, update_data).await
    }

    /// Deletes the listed platforms; nothing is removed if any id is unknown.
    pub async fn delete_platforms(&self, ids: &[i64]) -> AppResult<usize> {
        for id in ids {
            self.get_platform(*id).await?;
        }
        let affected = self.repo.delete_many(ids).await?;
        tracing::info!(deleted = affected, "Platforms deleted");
        Ok(affected)
    }
}
