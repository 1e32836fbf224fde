use std::sync::Arc;

use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::auth::models::FederatedIdentity;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::IdentityProvider;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;

fn identity_provider(state: &AppState) -> Result<Arc<dyn IdentityProvider>, ApiError> {
    state
        .identity_provider
        .clone()
        .ok_or_else(|| ApiError::NotFound("Federated login is not configured".to_string()))
}

/// Send the browser to the provider consent screen.
pub async fn google_login(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let provider = identity_provider(&state)?;
    Ok(Redirect::to(&provider.authorization_url()))
}

/// Provider redirect target.
///
/// A missing code or a failed exchange reaches the orchestrator as an absent
/// identity and is answered with 401.
pub async fn google_callback(
    State(state): State<AppState>,
    Query(params): Query<GoogleCallbackParams>,
) -> Result<ApiSuccess<FederatedLoginResponseData>, ApiError> {
    let provider = identity_provider(&state)?;

    let identity = match params.code {
        Some(code) => exchange(provider.as_ref(), &code).await,
        None => {
            tracing::warn!(error = ?params.error, "OAuth callback without authorization code");
            None
        }
    };

    let login = state.auth_service.federated_login(identity).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        FederatedLoginResponseData {
            message: login.outcome.message().to_string(),
            user: (&login.user).into(),
            access_token: login.access_token,
        },
    ))
}

async fn exchange(provider: &dyn IdentityProvider, code: &str) -> Option<FederatedIdentity> {
    provider
        .exchange_code(code)
        .await
        .map_err(|e| tracing::warn!(error = %e, "OAuth code exchange failed"))
        .ok()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleCallbackParams {
    code: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FederatedLoginResponseData {
    pub message: String,
    pub user: UserData,
    pub access_token: String,
}
