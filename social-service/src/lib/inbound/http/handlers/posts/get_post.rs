use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::router::AppState;

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    state
        .post_service
        .get_post(&post_id)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}
