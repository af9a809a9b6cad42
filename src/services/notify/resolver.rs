use crate::error::AppResult;
use crate::models::{NotifyChannel, NotifyKey};
use crate::services::notify::NotifyStore;

/// Picks the channels a send fans out to. First match wins:
///
/// 1. an explicit `channel_id`, if owned by the key's user and active;
///    anything else yields an empty list
/// 2. the channels bound to the key, when any are configured
/// 3. the user's active default channels, falling back to all active ones
pub async fn resolve_channels(
    store: &dyn NotifyStore,
    key: &NotifyKey,
    channel_id: Option<i64>,
) -> AppResult<Vec<NotifyChannel>> {
    if let Some(channel_id) = channel_id {
        let channel = store.find_channel(channel_id).await?;
        return Ok(channel
            .filter(|c| c.user_id == key.user_id && c.is_active())
            .into_iter()
            .collect());
    }

    let bound = key.bound_channel_ids();
    if !bound.is_empty() {
        return store.find_active_channels(&bound).await;
    }

    let defaults = store.find_user_channels(key.user_id, true).await?;
    if !defaults.is_empty() {
        return Ok(defaults);
    }

    store.find_user_channels(key.user_id, false).await
}
