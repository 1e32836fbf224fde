use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::FederatedIdentity;
use crate::domain::auth::models::FederatedLogin;
use crate::domain::auth::models::FederatedOutcome;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginResult;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSummary;
use crate::domain::user::models::Username;
use crate::user::ports::UserRepository;

/// Authentication orchestrator.
///
/// Registration, local login, federated login and bearer token resolution
/// over an injected credential store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        self.authenticator
            .issue_token(user.id, user.username.as_str())
            .map_err(AuthError::TokenIssuance)
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: CreateUserCommand) -> Result<UserSummary, AuthError> {
        let existing = self
            .repository
            .find_by_email_or_username(command.email.as_str(), command.username.as_str())
            .await?;

        if let Some(existing) = existing {
            tracing::info!(
                existing_user_id = %existing.id,
                "Registration rejected, email or username taken"
            );
            return Err(AuthError::Conflict);
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(UserSummary::from(user))
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginResult, AuthError> {
        let Some(user) = self
            .repository
            .find_by_username(&command.username)
            .await?
        else {
            tracing::debug!("Login failed: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                user.id,
                user.username.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Login failed: password mismatch");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => AuthError::TokenIssuance(err),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResult {
            access_token: result.access_token,
        })
    }

    async fn federated_login(
        &self,
        identity: Option<FederatedIdentity>,
    ) -> Result<FederatedLogin, AuthError> {
        let identity = identity.ok_or(AuthError::MissingFederatedIdentity)?;

        if let Some(user) = self.repository.find_by_email(&identity.email).await? {
            let access_token = self.issue_token(&user)?;
            tracing::info!(user_id = %user.id, "Federated login for existing user");

            return Ok(FederatedLogin {
                outcome: FederatedOutcome::Existing,
                user,
                access_token,
            });
        }

        // Federated accounts carry no local password; the empty hash never verifies.
        let user = self
            .repository
            .create(NewUser {
                username: Username::from_federated_profile(
                    &identity.first_name,
                    &identity.last_name,
                ),
                email: EmailAddress::new_unchecked(identity.email),
                password_hash: String::new(),
            })
            .await?;

        let access_token = self.issue_token(&user)?;
        tracing::info!(user_id = %user.id, "Federated login created user");

        Ok(FederatedLogin {
            outcome: FederatedOutcome::New,
            user,
            access_token,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(AuthError::InvalidToken)?;

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|_| AuthError::InvalidSubject(claims.sub.clone()))?;

        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UnknownUser(user_id))
    }
}
