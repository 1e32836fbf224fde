use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::Post;
use crate::domain::user::models::User;
use crate::domain::user::models::UserSummary;
use crate::user::errors::UserError;

pub mod auth;
pub mod posts;
pub mod status;
pub mod users;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_)
            | UserError::NotFoundByUsername(_)
            | UserError::NotFoundByEmail(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidUserId(_)
            | UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => ApiError::BadRequest(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Conflict => ApiError::Conflict(err.to_string()),
            AuthError::EmptyLoginField(_) => ApiError::BadRequest(err.to_string()),
            AuthError::InvalidCredentials | AuthError::MissingFederatedIdentity => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::InvalidToken(_)
            | AuthError::InvalidSubject(_)
            | AuthError::UnknownUser(_) => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            AuthError::User(user_err) => ApiError::from(user_err),
            AuthError::TokenIssuance(_) | AuthError::Password(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::InvalidPostId(_)
            | PostError::InvalidTitle(_)
            | PostError::InvalidContent(_) => ApiError::BadRequest(err.to_string()),
            PostError::NotFound(_) => ApiError::NotFound(err.to_string()),
            PostError::NotAuthor { .. } => ApiError::Forbidden(err.to_string()),
            PostError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    status_code: u16,
    message: String,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            message,
        }
    }
}

/// Public view of a user shared by the auth and users endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(rename = "createdTime")]
    pub created_time: DateTime<Utc>,
}

impl From<&UserSummary> for UserData {
    fn from(user: &UserSummary) -> Self {
        Self {
            id: user.id.0,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_time: user.created_at,
        }
    }
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self::from(&UserSummary::from(user))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.0,
            title: post.title.as_str().to_string(),
            content: post.content.as_str().to_string(),
            user_id: post.user_id.0,
            created_at: post.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::models::PostId;
    use crate::domain::user::models::UserId;

    #[test]
    fn test_conflicts_map_to_409() {
        assert!(matches!(
            ApiError::from(AuthError::Conflict),
            ApiError::Conflict(msg) if msg.contains("already exists")
        ));
        assert!(matches!(
            ApiError::from(AuthError::User(UserError::UsernameAlreadyExists(
                "JaneDoe".to_string()
            ))),
            ApiError::Conflict(_)
        ));
    }

    #[test]
    fn test_token_failures_share_one_message() {
        let expired = ApiError::from(AuthError::InvalidToken(::auth::JwtError::Expired));
        let unknown = ApiError::from(AuthError::UnknownUser(UserId(4)));

        assert_eq!(expired, unknown);
        assert!(matches!(expired, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_not_author_maps_to_403() {
        let err = ApiError::from(PostError::NotAuthor {
            user_id: UserId(3),
            post_id: PostId(1),
        });

        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
