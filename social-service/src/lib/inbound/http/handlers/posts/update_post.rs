use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::extract::JsonBody;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a post (raw JSON)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePostRequest {
    fn try_into_command(self) -> Result<UpdatePostCommand, PostError> {
        let title = self.title.map(PostTitle::new).transpose()?;
        let content = self.content.map(PostContent::new).transpose()?;

        Ok(UpdatePostCommand { title, content })
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id = PostId::from_string(&id).map_err(PostError::from)?;
    let command = req.try_into_command()?;

    state
        .post_service
        .update_post(&post_id, &actor.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}
