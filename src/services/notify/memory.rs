//! In-memory store and scripted transport for exercising the send pipeline.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    DefaultFlag, NewNotifyLog, NotifyChannel, NotifyKey, NotifyPlatform, RecordStatus,
};
use crate::services::notify::{
    NotifyStore, SendCommit, WebhookRequest, WebhookResponse, WebhookTransport,
};

#[derive(Default)]
struct State {
    keys: BTreeMap<i64, NotifyKey>,
    channels: BTreeMap<i64, NotifyChannel>,
    platforms: BTreeMap<i64, NotifyPlatform>,
    logs: Vec<NewNotifyLog>,
}

/// [`NotifyStore`] over ordered maps; `commit_send` mirrors the SQL updates.
#[derive(Default)]
pub struct MemoryNotifyStore {
    state: Mutex<State>,
}

impl MemoryNotifyStore {
    pub fn insert_key(&self, key: NotifyKey) {
        self.state.lock().unwrap().keys.insert(key.key_id, key);
    }

    pub fn insert_channel(&self, channel: NotifyChannel) {
        self.state
            .lock()
            .unwrap()
            .channels
            .insert(channel.channel_id, channel);
    }

    pub fn insert_platform(&self, platform: NotifyPlatform) {
        self.state
            .lock()
            .unwrap()
            .platforms
            .insert(platform.platform_id, platform);
    }

    pub fn update_key(&self, key_id: i64, f: impl FnOnce(&mut NotifyKey)) {
        let mut state = self.state.lock().unwrap();
        f(state.keys.get_mut(&key_id).unwrap());
    }

    pub fn key(&self, key_id: i64) -> NotifyKey {
        self.state.lock().unwrap().keys[&key_id].clone()
    }

    pub fn channel(&self, channel_id: i64) -> NotifyChannel {
        self.state.lock().unwrap().channels[&channel_id].clone()
    }

    pub fn logs(&self) -> Vec<NewNotifyLog> {
        self.state.lock().unwrap().logs.clone()
    }
}

#[async_trait]
impl NotifyStore for MemoryNotifyStore {
    async fn find_active_key(&self, api_key: &str) -> AppResult<Option<NotifyKey>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .keys
            .values()
            .find(|k| k.api_key == api_key && k.status == RecordStatus::Active)
            .cloned())
    }

    async fn find_channel(&self, channel_id: i64) -> AppResult<Option<NotifyChannel>> {
        Ok(self.state.lock().unwrap().channels.get(&channel_id).cloned())
    }

    async fn find_active_channels(&self, ids: &[i64]) -> AppResult<Vec<NotifyChannel>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .channels
            .values()
            .filter(|c| ids.contains(&c.channel_id) && c.is_active())
            .cloned()
            .collect())
    }

    async fn find_user_channels(
        &self,
        user_id: i64,
        defaults_only: bool,
    ) -> AppResult<Vec<NotifyChannel>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .channels
            .values()
            .filter(|c| c.user_id == user_id && c.is_active())
            .filter(|c| !defaults_only || c.is_default == DefaultFlag::Yes)
            .cloned()
            .collect())
    }

    async fn find_platform(&self, platform_id: i64) -> AppResult<Option<NotifyPlatform>> {
        Ok(self.state.lock().unwrap().platforms.get(&platform_id).cloned())
    }

    async fn commit_send(&self, commit: SendCommit) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let usage = commit.usage;

        if let Some(key) = state.keys.get_mut(&usage.key_id) {
            key.daily_used = if usage.reset { 1 } else { key.daily_used + 1 };
            key.total_count += 1;
            key.last_reset_date = Some(usage.today);
            key.last_used_time = Some(usage.used_at);
        }
        state.logs.extend(commit.logs);
        for id in commit.succeeded_channel_ids {
            if let Some(channel) = state.channels.get_mut(&id) {
                channel.use_count += 1;
                channel.last_used_time = Some(usage.used_at);
            }
        }
        Ok(())
    }
}

pub type ScriptedReply = Result<WebhookResponse, String>;

pub fn reply(status: u16, body: &str) -> ScriptedReply {
    Ok(WebhookResponse {
        status,
        body: body.to_string(),
    })
}

/// Transport that answers with queued replies and records every request.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<WebhookRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<WebhookRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookTransport for ScriptedTransport {
    async fn execute(&self, request: &WebhookRequest) -> anyhow::Result<WebhookResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(text)) => Err(anyhow::anyhow!(text)),
            None => Err(anyhow::anyhow!("no scripted reply left")),
        }
    }
}

pub fn sample_key(key_id: i64, user_id: i64, api_key: &str) -> NotifyKey {
    NotifyKey {
        key_id,
        user_id,
        key_name: format!("Key {}", key_id),
        api_key: api_key.to_string(),
        channel_ids: None,
        daily_limit: 100,
        daily_used: 0,
        total_count: 0,
        last_used_time: None,
        last_reset_date: None,
        status: RecordStatus::Active,
        expire_time: None,
        create_by: None,
        create_time: None,
        update_by: None,
        update_time: None,
        remark: None,
    }
}

pub fn sample_channel(channel_id: i64, user_id: i64, platform_id: i64) -> NotifyChannel {
    NotifyChannel {
        channel_id,
        user_id,
        platform_id,
        channel_name: format!("Channel {}", channel_id),
        webhook_key: format!("hook-{}", channel_id),
        webhook_url: None,
        is_default: DefaultFlag::No,
        status: RecordStatus::Active,
        last_used_time: None,
        use_count: 0,
        create_by: None,
        create_time: None,
        update_by: None,
        update_time: None,
        remark: None,
    }
}

pub fn sample_platform(platform_id: i64, webhook_template: &str) -> NotifyPlatform {
    NotifyPlatform {
        platform_id,
        platform_name: format!("Platform {}", platform_id),
        platform_code: format!("p{}", platform_id),
        platform_icon: None,
        webhook_template: webhook_template.to_string(),
        request_method: Some("POST".to_string()),
        content_type: Some("application/json".to_string()),
        body_template: None,
        status: RecordStatus::Active,
        order_num: 0,
        create_by: None,
        create_time: None,
        update_by: None,
        update_time: None,
        remark: None,
    }
}
