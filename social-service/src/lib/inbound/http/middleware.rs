use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// User resolved by the route guard, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Why the guard refused a request. Every variant answers 401.
#[derive(Debug)]
enum GuardRejection {
    MissingHeader,
    MalformedHeader,
    Auth(AuthError),
}

impl From<GuardRejection> for ApiError {
    fn from(rejection: GuardRejection) -> Self {
        match rejection {
            GuardRejection::MissingHeader => {
                tracing::warn!(reason = "missing_header", "Request rejected by route guard");
                ApiError::Unauthorized("Missing Authorization header".to_string())
            }
            GuardRejection::MalformedHeader => {
                tracing::warn!(reason = "malformed_header", "Request rejected by route guard");
                ApiError::Unauthorized(
                    "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
                )
            }
            GuardRejection::Auth(err) => {
                match &err {
                    AuthError::InvalidToken(jwt_err) => tracing::warn!(
                        reason = jwt_err.kind(),
                        "Request rejected by route guard"
                    ),
                    AuthError::InvalidSubject(subject) => tracing::warn!(
                        reason = "invalid_subject",
                        subject = %subject,
                        "Request rejected by route guard"
                    ),
                    AuthError::UnknownUser(user_id) => tracing::warn!(
                        reason = "unknown_user",
                        user_id = %user_id,
                        "Request rejected by route guard"
                    ),
                    _ => {}
                }
                ApiError::from(err)
            }
        }
    }
}

/// Route guard: bearer token, then signature and expiry, then user lookup.
///
/// Only a request whose token resolves to a stored user reaches the handler;
/// the user is attached as [`AuthenticatedUser`].
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let user = state
        .auth_service
        .authenticate(&token)
        .await
        .map_err(GuardRejection::Auth)?;

    tracing::debug!(user_id = %user.id, "Request authenticated");
    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<String, GuardRejection> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(GuardRejection::MissingHeader)?
        .to_str()
        .map_err(|_| GuardRejection::MalformedHeader)?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(GuardRejection::MalformedHeader),
    }
}
