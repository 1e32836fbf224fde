use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Errors raised by the authentication orchestrator and the route guard.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("User already exists with the same email or username")]
    Conflict,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0} should not be empty")]
    EmptyLoginField(&'static str),

    #[error("No user from provider")]
    MissingFederatedIdentity,

    #[error("Invalid token: {0}")]
    InvalidToken(JwtError),

    #[error("Token subject is not a user id: {0}")]
    InvalidSubject(String),

    #[error("Token subject {0} no longer exists")]
    UnknownUser(UserId),

    #[error("Failed to issue token: {0}")]
    TokenIssuance(JwtError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error(transparent)]
    User(#[from] UserError),
}

impl AuthError {
    /// True for every failure that must surface as 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::MissingFederatedIdentity
                | AuthError::InvalidToken(_)
                | AuthError::InvalidSubject(_)
                | AuthError::UnknownUser(_)
        )
    }
}

/// Errors raised by an upstream OAuth provider adapter.
#[derive(Debug, Clone, Error)]
pub enum OAuthError {
    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider rejected the authorization code: {0}")]
    CodeRejected(String),

    #[error("Provider profile is missing {0}")]
    IncompleteProfile(&'static str),
}
