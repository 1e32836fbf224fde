use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use axum::http::HeaderValue;
use social_service::config::Config;
use social_service::domain::auth::ports::IdentityProvider;
use social_service::domain::auth::service::AuthService;
use social_service::domain::post::service::PostService;
use social_service::domain::user::service::UserService;
use social_service::inbound::http::router::create_router;
use social_service::inbound::http::router::AppState;
use social_service::inbound::websocket::ChatRegistry;
use social_service::outbound::oauth::GoogleIdentityProvider;
use social_service::outbound::repositories::PostgresPostRepository;
use social_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "social-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        cors_allowed_origin = %config.server.cors_allowed_origin,
        jwt_expiration_hours = config.jwt.expiration_hours,
        password_cost = config.password.cost,
        google_oauth = config.google.is_some(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_cost(config.password.cost)?;
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_lifetime(),
        password_hasher,
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));

    let identity_provider = config.google.as_ref().map(|google| {
        Arc::new(GoogleIdentityProvider::new(google)) as Arc<dyn IdentityProvider>
    });

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        )),
        user_service: Arc::new(UserService::new(user_repository, password_hasher)),
        post_service: Arc::new(PostService::new(post_repository)),
        identity_provider,
        chat_registry: ChatRegistry::new(),
    };

    let cors_allowed_origin = HeaderValue::from_str(&config.server.cors_allowed_origin)?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, cors_allowed_origin);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
