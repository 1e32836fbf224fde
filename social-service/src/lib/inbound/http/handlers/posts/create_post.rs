use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::extract::JsonBody;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(author)): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<CreatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    state
        .post_service
        .create_post(&author.id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

/// HTTP request body for creating a post (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

impl CreatePostRequest {
    fn try_into_command(self) -> Result<CreatePostCommand, PostError> {
        let title = PostTitle::new(self.title)?;
        let content = PostContent::new(self.content)?;
        Ok(CreatePostCommand::new(title, content))
    }
}
