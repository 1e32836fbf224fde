use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::post::models::Post;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// A user together with their posts, oldest first.
pub async fn get_user_posts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserPostsResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    let user = state.user_service.get_user(&user_id).await?;
    let posts = state.post_service.list_posts_by_user(&user_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UserPostsResponseData {
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            posts: posts.iter().map(UserPostData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPostsResponseData {
    pub username: String,
    pub email: String,
    pub posts: Vec<UserPostData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPostData {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for UserPostData {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.as_str().to_string(),
            content: post.content.as_str().to_string(),
            created_at: post.created_at,
        }
    }
}
