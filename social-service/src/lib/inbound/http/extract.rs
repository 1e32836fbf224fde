use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::inbound::http::handlers::ApiError;

/// JSON request body whose rejections answer with the API error body.
///
/// Syntax errors, type mismatches, unknown fields and a missing
/// `Content-Type` all become 400.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Request body rejected");
        ApiError::BadRequest(rejection.body_text())
    }
}
