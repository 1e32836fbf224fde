use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::OAuthError;
use crate::domain::auth::models::FederatedIdentity;
use crate::domain::auth::models::FederatedLogin;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginResult;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserSummary;

/// Port for the authentication orchestrator.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new local account.
    ///
    /// Performs one lookup by email or username and at most one create.
    ///
    /// # Errors
    /// * `Conflict` - A user with the same email or username exists
    /// * `Password` - Hashing failed
    /// * `User` - Store failure, including uniqueness races caught by the store
    async fn register(&self, command: CreateUserCommand) -> Result<UserSummary, AuthError>;

    /// Verify local credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `TokenIssuance` - Token could not be signed
    /// * `User` - Store failure
    async fn login(&self, command: LoginCommand) -> Result<LoginResult, AuthError>;

    /// Find or create the account linked to a federated identity.
    ///
    /// # Errors
    /// * `MissingFederatedIdentity` - The provider returned no identity
    /// * `TokenIssuance` - Token could not be signed
    /// * `User` - Store failure, including a derived username collision
    async fn federated_login(
        &self,
        identity: Option<FederatedIdentity>,
    ) -> Result<FederatedLogin, AuthError>;

    /// Resolve the user behind a bearer token.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, badly signed or expired token
    /// * `InvalidSubject` - Token subject is not a user id
    /// * `UnknownUser` - Token subject no longer exists
    /// * `User` - Store failure
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;
}

/// Upstream OAuth provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// URL of the provider consent screen.
    fn authorization_url(&self) -> String;

    /// Trade an authorization code for the user's profile.
    ///
    /// # Errors
    /// * `OAuthError` - The exchange or the profile lookup failed
    async fn exchange_code(&self, code: &str) -> Result<FederatedIdentity, OAuthError>;
}
