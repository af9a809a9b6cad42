use chrono::NaiveDateTime;

use crate::error::{AppError, AppResult};
use crate::models::NotifyKey;
use crate::services::notify::NotifyStore;

/// Resolves a raw API key to its active, unexpired record.
///
/// Read-only: validating the same key twice without intervening writes
/// returns equal records.
pub async fn validate_api_key(
    store: &dyn NotifyStore,
    api_key: &str,
    now: NaiveDateTime,
) -> AppResult<NotifyKey> {
    let key = store
        .find_active_key(api_key)
        .await?
        .ok_or(AppError::InvalidApiKey)?;

    if key.is_expired(now) {
        tracing::debug!(key_id = key.key_id, "API key expired");
        return Err(AppError::InvalidApiKey);
    }

    Ok(key)
}
