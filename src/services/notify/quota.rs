use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AppError, AppResult};
use crate::models::NotifyKey;
use crate::services::notify::KeyUsage;

/// Checks the key's daily quota as of `today`.
///
/// A key last reset on an earlier day counts as unused; the reset itself is
/// only persisted through the returned [`KeyUsage`] when the send commits.
pub fn check_quota(key: &NotifyKey, today: NaiveDate, now: NaiveDateTime) -> AppResult<KeyUsage> {
    let reset = key.last_reset_date != Some(today);
    let used = if reset { 0 } else { key.daily_used };

    if used >= key.daily_limit {
        tracing::info!(
            key_id = key.key_id,
            daily_used = used,
            daily_limit = key.daily_limit,
            "Daily quota exhausted"
        );
        return Err(AppError::QuotaExceeded {
            daily_limit: key.daily_limit,
        });
    }

    Ok(KeyUsage {
        key_id: key.key_id,
        reset,
        today,
        used_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notify::memory::sample_key;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn at(d: u32) -> NaiveDateTime {
        day(d).and_hms_opt(9, 30, 0).unwrap()
    }

    #[test]
    fn test_quota_full_today_is_rejected() {
        let mut key = sample_key(1, 7, "k");
        key.daily_limit = 5;
        key.daily_used = 5;
        key.last_reset_date = Some(day(10));

        let err = check_quota(&key, day(10), at(10)).unwrap_err();
        assert!(matches!(err, AppError::QuotaExceeded { daily_limit: 5 }));
    }

    #[test]
    fn test_quota_full_yesterday_resets() {
        let mut key = sample_key(1, 7, "k");
        key.daily_limit = 5;
        key.daily_used = 5;
        key.last_reset_date = Some(day(9));

        let usage = check_quota(&key, day(10), at(10)).unwrap();
        assert!(usage.reset);
        assert_eq!(usage.today, day(10));
        assert_eq!(usage.used_at, at(10));
    }

    #[test]
    fn test_never_reset_key_resets_on_first_use() {
        let mut key = sample_key(1, 7, "k");
        key.last_reset_date = None;
        key.daily_used = 3;

        let usage = check_quota(&key, day(10), at(10)).unwrap();
        assert!(usage.reset);
    }

    #[test]
    fn test_quota_with_room_does_not_reset() {
        let mut key = sample_key(1, 7, "k");
        key.daily_limit = 5;
        key.daily_used = 4;
        key.last_reset_date = Some(day(10));

        let usage = check_quota(&key, day(10), at(10)).unwrap();
        assert!(!usage.reset);
    }

    #[test]
    fn test_zero_limit_always_rejects() {
        let mut key = sample_key(1, 7, "k");
        key.daily_limit = 0;
        key.daily_used = 0;
        key.last_reset_date = Some(day(9));

        assert!(check_quota(&key, day(10), at(10)).is_err());
    }
}
