use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    let posts = state.post_service.list_posts().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        posts.iter().map(PostData::from).collect(),
    ))
}

/// Posts of one user, oldest first.
pub async fn list_posts_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    let posts = state.post_service.list_posts_by_user(&user_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        posts.iter().map(PostData::from).collect(),
    ))
}
