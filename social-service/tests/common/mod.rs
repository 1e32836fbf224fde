#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use axum::http::HeaderValue;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use social_service::domain::auth::errors::OAuthError;
use social_service::domain::auth::models::FederatedIdentity;
use social_service::domain::auth::ports::IdentityProvider;
use social_service::domain::auth::service::AuthService;
use social_service::domain::post::errors::PostError;
use social_service::domain::post::models::NewPost;
use social_service::domain::post::models::Post;
use social_service::domain::post::models::PostId;
use social_service::domain::post::ports::PostRepository;
use social_service::domain::post::service::PostService;
use social_service::domain::user::models::NewUser;
use social_service::domain::user::models::User;
use social_service::domain::user::models::UserId;
use social_service::domain::user::ports::UserRepository;
use social_service::domain::user::service::UserService;
use social_service::inbound::http::router::create_router;
use social_service::inbound::http::router::AppState;
use social_service::inbound::websocket::ChatRegistry;
use social_service::user::errors::UserError;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const GOOD_CODE: &str = "good-code";

/// Test application that spawns a real server over in-memory adapters
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application with a fake Google provider mounted
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(Some(Arc::new(FakeIdentityProvider::new()))).await
    }

    /// Spawn the application without federated login routes
    pub async fn spawn_without_identity_provider() -> Self {
        Self::spawn_with_provider(None).await
    }

    async fn spawn_with_provider(identity_provider: Option<Arc<dyn IdentityProvider>>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let password_hasher =
            PasswordHasher::with_cost(PasswordHasher::MIN_COST).expect("Minimum cost is valid");
        let authenticator = Arc::new(Authenticator::new(
            JWT_SECRET,
            Duration::hours(1),
            password_hasher,
        ));

        let users = Arc::new(InMemoryUserRepository::default());
        let posts = Arc::new(InMemoryPostRepository::default());

        let state = AppState {
            auth_service: Arc::new(AuthService::new(Arc::clone(&users), authenticator)),
            user_service: Arc::new(UserService::new(Arc::clone(&users), password_hasher)),
            post_service: Arc::new(PostService::new(posts)),
            identity_provider,
            chat_registry: ChatRegistry::new(),
        };

        let router = create_router(state, HeaderValue::from_static("http://localhost:3000"));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
            jwt_handler: JwtHandler::new(JWT_SECRET),
            users,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return its id
    pub async fn register(&self, username: &str, email: &str, password: &str) -> i64 {
        let response = self
            .post("/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["id"].as_i64().expect("Missing id")
    }

    /// Log in and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/auth/login")
            .json(&json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }

    /// Register then log in, returning id and token
    pub async fn signed_up(&self, username: &str, email: &str, password: &str) -> (i64, String) {
        let id = self.register(username, email, password).await;
        let token = self.login(username, password).await;
        (id, token)
    }
}

/// Credential store kept in memory, enforcing the same uniqueness rules as
/// the users table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    create_calls: Mutex<usize>,
}

impl InMemoryUserRepository {
    pub fn create_calls(&self) -> usize {
        *self.create_calls.lock().unwrap()
    }

    pub fn find(&self, id: i64) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == UserId(id))
            .cloned()
    }

    fn check_unique(users: &[User], candidate: &User) -> Result<(), UserError> {
        for user in users.iter().filter(|user| user.id != candidate.id) {
            if user.username == candidate.username {
                return Err(UserError::UsernameAlreadyExists(
                    candidate.username.to_string(),
                ));
            }
            if user.email == candidate.email {
                return Err(UserError::EmailAlreadyExists(candidate.email.to_string()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        *self.create_calls.lock().unwrap() += 1;

        let mut users = self.users.lock().unwrap();
        let next_id = users.iter().map(|user| user.id.0).max().unwrap_or(0) + 1;
        let user = User {
            id: UserId(next_id),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };

        Self::check_unique(&users, &user)?;
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.find(id.0))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|user| user.username.as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.email.as_str() == email).cloned())
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|user| user.email.as_str() == email || user.username.as_str() == username)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        Self::check_unique(&users, &user)?;

        let slot = users
            .iter_mut()
            .find(|stored| stored.id == user.id)
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;
        *slot = user.clone();

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|user| user.id != *id);

        if users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        let mut posts = self.posts.lock().unwrap();
        let next_id = posts.iter().map(|post| post.id.0).max().unwrap_or(0) + 1;
        let post = Post {
            id: PostId(next_id),
            title: post.title,
            content: post.content,
            user_id: post.user_id,
            created_at: Utc::now(),
        };
        posts.push(post.clone());

        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|post| post.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Post>, PostError> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|post| post.user_id == *user_id)
            .cloned()
            .collect();
        posts.sort_by_key(|post| (post.created_at, post.id));
        Ok(posts)
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|stored| stored.id == post.id)
            .ok_or(PostError::NotFound(post.id))?;
        *slot = post.clone();

        Ok(post)
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|post| post.id != *id);

        if posts.len() == before {
            return Err(PostError::NotFound(*id));
        }
        Ok(())
    }
}

/// Provider that accepts a single authorization code.
pub struct FakeIdentityProvider {
    identities: HashMap<String, FederatedIdentity>,
}

impl FakeIdentityProvider {
    pub fn new() -> Self {
        let mut identities = HashMap::new();
        identities.insert(
            GOOD_CODE.to_string(),
            FederatedIdentity {
                email: "jane@x.com".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            },
        );
        Self { identities }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    fn authorization_url(&self) -> String {
        "https://provider.test/consent?client_id=test".to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<FederatedIdentity, OAuthError> {
        self.identities
            .get(code)
            .cloned()
            .ok_or_else(|| OAuthError::CodeRejected(code.to_string()))
    }
}
