//! Caller identity for the management API.
//!
//! An upstream gateway authenticates the user and forwards the numeric user
//! id in a header (`notify.user_header`, `x-user-id` by default). Platform
//! writes additionally require the id to be listed in `notify.admin_user_ids`.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, available to handlers as `Extension<AuthUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i64,
}

impl AuthUser {
    /// Value recorded in `create_by` / `update_by`.
    pub fn operator(&self) -> String {
        self.user_id.to_string()
    }

    /// `Forbidden` unless this user is one of `admin_user_ids`.
    pub fn ensure_admin(&self, admin_user_ids: &[i64]) -> Result<(), AppError> {
        if admin_user_ids.contains(&self.user_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden {
                message: "Only administrators can manage platforms".to_string(),
            })
        }
    }

    fn from_headers(headers: &HeaderMap, header_name: &str) -> Result<Self, AppError> {
        let raw = headers
            .get(header_name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Unauthorized {
                message: format!("Missing {} header", header_name),
            })?;

        match raw.parse::<i64>() {
            Ok(user_id) if user_id > 0 => Ok(AuthUser { user_id }),
            _ => Err(AppError::Unauthorized {
                message: format!("Invalid {} header", header_name),
            }),
        }
    }
}

/// Caller that passed [`auth_middleware`] and is a configured administrator.
///
/// Extracted before the request body, so a non-admin is refused even when the
/// payload is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let user = parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized {
                message: format!("Missing {} header", state.notify.user_header),
            })?;
        user.ensure_admin(&state.notify.admin_user_ids)?;
        Ok(AdminUser(user))
    }
}

/// Rejects requests without a valid user header and stores the [`AuthUser`]
/// in the request extensions.
///
/// # Example
/// ```ignore
/// router.layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = AuthUser::from_headers(request.headers(), &state.notify.user_header)?;
    tracing::Span::current().record("user_id", user.user_id);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_valid_user_header() {
        let user = AuthUser::from_headers(&headers(" 42 "), "x-user-id").unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.operator(), "42");
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let err = AuthUser::from_headers(&HeaderMap::new(), "x-user-id").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { ref message } if message.contains("Missing")));
    }

    #[test]
    fn test_non_positive_or_garbage_rejected() {
        for value in ["0", "-3", "abc"] {
            let err = AuthUser::from_headers(&headers(value), "x-user-id").unwrap_err();
            assert!(matches!(err, AppError::Unauthorized { .. }), "value {}", value);
        }
    }

    #[test]
    fn test_ensure_admin() {
        let user = AuthUser { user_id: 7 };
        assert!(user.ensure_admin(&[1, 7]).is_ok());

        let err = user.ensure_admin(&[1]).unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
        assert!(user.ensure_admin(&[]).is_err());
    }

    #[test]
    fn test_custom_header_name() {
        let mut map = HeaderMap::new();
        map.insert("x-gateway-user", HeaderValue::from_static("9"));
        assert_eq!(
            AuthUser::from_headers(&map, "x-gateway-user").unwrap().user_id,
            9
        );
    }
}
