use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let post_id = PostId::from_string(&id).map_err(PostError::from)?;

    state.post_service.delete_post(&post_id, &actor.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
