use std::fmt;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;

/// Profile returned by an upstream OAuth provider after a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedIdentity {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Local login attempt.
///
/// Fields are only checked for presence; a malformed username fails like a
/// wrong password.
#[derive(Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Build a command from request input.
    ///
    /// # Errors
    /// * `EmptyLoginField` - Username or password is empty
    pub fn parse(username: String, password: String) -> Result<Self, AuthError> {
        if username.is_empty() {
            return Err(AuthError::EmptyLoginField("username"));
        }
        if password.is_empty() {
            return Err(AuthError::EmptyLoginField("password"));
        }
        Ok(Self::new(username, password))
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful local login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub access_token: String,
}

/// Whether a federated login matched an existing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederatedOutcome {
    Existing,
    New,
}

impl FederatedOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            FederatedOutcome::Existing => "existing user",
            FederatedOutcome::New => "new user",
        }
    }
}

/// Successful federated login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedLogin {
    pub outcome: FederatedOutcome,
    pub user: User,
    pub access_token: String,
}
