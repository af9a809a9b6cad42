//! Extractors that deserialize and then run `validator` rules.

use crate::error::{AppError, AppResult};
use axum::extract::{
    Form, FromRequest, FromRequestParts, Json, Query, Request,
    rejection::{FormRejection, JsonRejection, QueryRejection},
};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that passed validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string that passed validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| AppError::from(e))?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

/// Url-encoded form body that passed validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Form(value) = Form::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedForm(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct ChannelForm {
        #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
        channel_name: String,
        #[validate(range(min = 1, message = "Platform id must be positive"))]
        platform_id: i64,
    }

    fn request(content_type: &str, body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_json() {
        let req = request(
            "application/json",
            r#"{"channel_name":"ops","platform_id":2}"#,
        );

        let ValidatedJson(form) = ValidatedJson::<ChannelForm>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(form.channel_name, "ops");
        assert_eq!(form.platform_id, 2);
    }

    #[tokio::test]
    async fn test_json_validation_errors_collected() {
        let req = request("application/json", r#"{"channel_name":"","platform_id":0}"#);

        match ValidatedJson::<ChannelForm>::from_request(req, &()).await {
            Err(AppError::ValidationErrors { errors }) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["channel_name", "platform_id"]);
            }
            other => panic!("Expected ValidationErrors, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_json_rejection_is_bad_request() {
        let req = request("application/json", r#"{"channel_name":"ops"}"#);

        match ValidatedJson::<ChannelForm>::from_request(req, &()).await {
            Err(AppError::BadRequest { message }) => assert!(!message.is_empty()),
            other => panic!("Expected BadRequest, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_valid_form() {
        let req = request(
            "application/x-www-form-urlencoded",
            "channel_name=ops&platform_id=3",
        );

        let ValidatedForm(form) = ValidatedForm::<ChannelForm>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(form.platform_id, 3);
    }

    #[tokio::test]
    async fn test_query_validation() {
        let (mut parts, _) = Request::builder()
            .uri("/test?channel_name=ops&platform_id=-1")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        match ValidatedQuery::<ChannelForm>::from_request_parts(&mut parts, &()).await {
            Err(AppError::ValidationErrors { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "platform_id");
                assert!(errors[0].message.contains("positive"));
            }
            other => panic!("Expected ValidationErrors, got {:?}", other.err()),
        }
    }
}
