//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod channel_service;
mod key_service;
mod log_service;
pub mod notify;
mod platform_service;

pub use channel_service::ChannelService;
pub use key_service::{KeyDraft, KeyService, join_channel_ids};
pub use log_service::LogService;
pub use notify::NotifySendService;
pub use platform_service::PlatformService;

use std::sync::Arc;
use std::time::Duration;

use crate::config::NotifyConfig;
use crate::repositories::Repositories;
use crate::services::notify::HttpTransport;
use crate::utils::clock::{Clock, SystemClock};

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub platforms: PlatformService,
    pub channels: ChannelService,
    pub keys: KeyService,
    pub logs: LogService,
    pub sender: NotifySendService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, notify: &NotifyConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        Self {
            platforms: PlatformService::new(repos.platforms.clone(), clock.clone()),
            channels: ChannelService::new(
                repos.channels.clone(),
                repos.platforms,
                clock.clone(),
            ),
            keys: KeyService::new(
                repos.keys,
                repos.channels,
                clock.clone(),
                notify.default_daily_limit,
            ),
            logs: LogService::new(repos.logs),
            sender: NotifySendService::new(
                Arc::new(repos.store),
                Arc::new(HttpTransport),
                clock,
                Duration::from_secs(notify.send_timeout_secs),
                Duration::from_secs(notify.test_timeout_secs),
            ),
        }
    }
}
