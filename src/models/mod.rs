mod notify_channel;
mod notify_key;
mod notify_log;
mod notify_platform;
mod status;

pub use notify_channel::{NewNotifyChannel, NotifyChannel, UpdateNotifyChannel};
pub use notify_key::{NewNotifyKey, NotifyKey, NotifyKeyFilter, UpdateNotifyKey, parse_channel_ids};
pub use notify_log::{NewNotifyLog, NotifyLog, NotifyLogFilter};
pub use notify_platform::{
    DEFAULT_CONTENT_TYPE, DEFAULT_REQUEST_METHOD, NewNotifyPlatform, NotifyPlatform,
    NotifyPlatformFilter, UpdateNotifyPlatform,
};
pub use status::{DefaultFlag, RecordStatus, SendStatus};
