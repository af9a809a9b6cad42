//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `send` - Public send endpoint parameters and envelope
//! - `platform`, `channel`, `key`, `log` - Management DTOs
//! - `error` - Common error response DTOs
//! - `pagination` - Pagination-related DTOs

mod channel;
mod error;
mod health;
mod key;
mod log;
mod pagination;
mod platform;
mod send;

pub use channel::{ChannelResponse, CreateChannelRequest, UpdateChannelRequest};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use key::{GenerateKeyRequest, KeyQuery, KeyResponse, UpdateKeyRequest};
pub use log::{LogQuery, LogResponse};
pub use pagination::{PagedResponse, PaginationMeta, PaginationParams};
pub use platform::{
    CreatePlatformRequest, PlatformQuery, PlatformResponse, UpdatePlatformRequest,
};
pub use send::{IdParam, SendParams, SendResponse};

use crate::error::{AppError, AppResult};

/// Most ids one batch delete may name
pub const MAX_BATCH_IDS: usize = 100;

/// Parses a comma-separated id path segment such as `3,5,8`.
///
/// Duplicates collapse to their first occurrence. Blank entries, non-positive
/// or non-numeric ids and lists longer than [`MAX_BATCH_IDS`] are rejected.
pub fn parse_id_list(raw: &str) -> AppResult<Vec<i64>> {
    let mut ids = Vec::new();
    for part in raw.split(',') {
        let id = part
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Validation {
                field: "ids".to_string(),
                reason: format!("'{}' is not a valid id", part.trim()),
            })?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    if ids.len() > MAX_BATCH_IDS {
        return Err(AppError::Validation {
            field: "ids".to_string(),
            reason: format!("At most {} ids can be deleted at once", MAX_BATCH_IDS),
        });
    }
    Ok(ids)
}

/// Maps an optional update field onto a nullable column: absent leaves the
/// column alone, an empty string sets it to NULL.
pub(crate) fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.is_empty() { None } else { Some(v) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("7").unwrap(), vec![7]);
        assert_eq!(parse_id_list(" 3, 5,3 ,8").unwrap(), vec![3, 5, 8]);
    }

    #[test]
    fn test_parse_id_list_rejects_bad_entries() {
        for raw in ["", "1,,2", "1,x", "0", "-4", "2,"] {
            match parse_id_list(raw) {
                Err(AppError::Validation { field, .. }) => assert_eq!(field, "ids", "{raw}"),
                other => panic!("expected validation error for '{raw}', got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_id_list_caps_batch_size() {
        let raw = (1..=MAX_BATCH_IDS as i64 + 1)
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        assert!(parse_id_list(&raw).is_err());
    }
}
