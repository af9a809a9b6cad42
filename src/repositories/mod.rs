//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for the notify tables and the
//! PostgreSQL-backed store used by the send pipeline.

mod channel_repo;
mod key_repo;
mod log_repo;
mod notify_store;
mod platform_repo;

pub use channel_repo::ChannelRepository;
pub use key_repo::KeyRepository;
pub use log_repo::LogRepository;
pub use notify_store::DieselNotifyStore;
pub use platform_repo::PlatformRepository;

use crate::db::AsyncDbPool;

/// `LIKE` pattern matching `needle` anywhere, with wildcards in it escaped.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub platforms: PlatformRepository,
    pub channels: ChannelRepository,
    pub keys: KeyRepository,
    pub logs: LogRepository,
    pub store: DieselNotifyStore,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            platforms: PlatformRepository::new(pool.clone()),
            channels: ChannelRepository::new(pool.clone()),
            keys: KeyRepository::new(pool.clone()),
            logs: LogRepository::new(pool.clone()),
            store: DieselNotifyStore::new(pool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("ci"), "%ci%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
