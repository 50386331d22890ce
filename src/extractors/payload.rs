//! JSON request body whose rejections use the application error body.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// Like `axum::Json`, but a body that does not deserialize answers with `AppError`
/// (422 for well-formed JSON of the wrong shape, 400 otherwise).
#[derive(Debug, Clone)]
pub struct JsonPayload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonPayload(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Student;
    use axum::body::Body;
    use axum::http::header;

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn accepts_a_student() {
        let JsonPayload(student) = JsonPayload::<Student>::from_request(
            request(Some("application/json"), r#"{"name":"Ada"}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(student.name, "Ada");
    }

    #[tokio::test]
    async fn missing_field_is_a_validation_error() {
        let err = JsonPayload::<Student>::from_request(request(Some("application/json"), "{}"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("name")));
    }

    #[tokio::test]
    async fn syntax_and_content_type_errors_are_bad_requests() {
        let err = JsonPayload::<Student>::from_request(request(Some("application/json"), "{"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = JsonPayload::<Student>::from_request(request(None, r#"{"name":"Ada"}"#), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
