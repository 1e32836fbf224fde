use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::google_callback;
use super::handlers::auth::google_login;
use super::handlers::auth::login;
use super::handlers::auth::register;
use super::handlers::posts::create_post;
use super::handlers::posts::delete_post;
use super::handlers::posts::get_post;
use super::handlers::posts::list_posts;
use super::handlers::posts::list_posts_by_user;
use super::handlers::posts::update_post;
use super::handlers::status::status;
use super::handlers::users::create_user;
use super::handlers::users::delete_user;
use super::handlers::users::get_user;
use super::handlers::users::get_user_by_email;
use super::handlers::users::get_user_by_username;
use super::handlers::users::get_user_posts;
use super::handlers::users::list_users;
use super::handlers::users::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::IdentityProvider;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::websocket::handler::chat_handler;
use crate::inbound::websocket::ChatRegistry;

/// Services shared by every handler, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub identity_provider: Option<Arc<dyn IdentityProvider>>,
    pub chat_registry: ChatRegistry,
}

pub fn create_router(state: AppState, cors_allowed_origin: HeaderValue) -> Router {
    let mut public_routes = Router::new()
        .route("/", get(status))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/users", post(create_user))
        .route("/posts/user/:user_id", get(list_posts_by_user))
        .route("/ws/chat", get(chat_handler));

    if state.identity_provider.is_some() {
        public_routes = public_routes
            .route("/auth/google", get(google_login))
            .route("/auth/google/callback", get(google_callback));
    }

    let protected_routes = Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/id/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/username/:username", get(get_user_by_username))
        .route("/users/email/:email", get(get_user_by_email))
        .route("/users/posts/:id", get(get_user_posts))
        .route("/posts", post(create_post).get(list_posts))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors_layer(cors_allowed_origin))
        .with_state(state)
}

fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
