//! Storage seam for the send pipeline.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::AppResult;
use crate::models::{NewNotifyLog, NotifyChannel, NotifyKey, NotifyPlatform};

/// Usage update applied to an API key when a send is committed.
///
/// When `reset` is set the day rolled over since the key was last used, so
/// `daily_used` restarts from this send instead of incrementing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage {
    pub key_id: i64,
    pub reset: bool,
    pub today: NaiveDate,
    pub used_at: NaiveDateTime,
}

/// Everything a completed send writes, applied atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct SendCommit {
    pub usage: KeyUsage,
    pub logs: Vec<NewNotifyLog>,
    /// Channels whose dispatch succeeded; their `use_count` is bumped.
    pub succeeded_channel_ids: Vec<i64>,
}

/// Data access needed by [`NotifySendService`](super::NotifySendService).
///
/// Reads are plain lookups; `commit_send` must apply the key usage, the log
/// rows and the channel counters in a single transaction.
#[async_trait]
pub trait NotifyStore: Send + Sync {
    /// Active key with exactly this raw string.
    async fn find_active_key(&self, api_key: &str) -> AppResult<Option<NotifyKey>>;

    /// Channel by id, any owner or status.
    async fn find_channel(&self, channel_id: i64) -> AppResult<Option<NotifyChannel>>;

    /// Active channels among `ids`, ordered by id.
    async fn find_active_channels(&self, ids: &[i64]) -> AppResult<Vec<NotifyChannel>>;

    /// Active channels of a user, optionally only the default ones, ordered by id.
    async fn find_user_channels(
        &self,
        user_id: i64,
        defaults_only: bool,
    ) -> AppResult<Vec<NotifyChannel>>;

    async fn find_platform(&self, platform_id: i64) -> AppResult<Option<NotifyPlatform>>;

    async fn commit_send(&self, commit: SendCommit) -> AppResult<()>;
}
