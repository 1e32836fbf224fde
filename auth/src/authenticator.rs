use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the only process-wide authentication state: the signing secret,
/// the token lifetime and the hashing cost. All of it is fixed at construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_lifetime` - Validity window of issued tokens
    /// * `password_hasher` - Hasher configured with the desired cost
    pub fn new(
        jwt_secret: &[u8],
        token_lifetime: Duration,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
            token_lifetime,
        }
    }

    /// Lifetime applied to every issued token.
    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and generate a JWT for the user.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Subject of the token
    /// * `username` - Username carried in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: impl ToString,
        username: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(user_id, username)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Generate a JWT without password verification.
    ///
    /// Used when the identity was already established by other means
    /// (federated login).
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, user_id: impl ToString, username: &str) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, username, self.token_lifetime);
        self.jwt_handler.encode(&claims)
    }

    /// Validate and decode a JWT.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, badly signed or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(
            SECRET,
            Duration::hours(1),
            PasswordHasher::with_cost(PasswordHasher::MIN_COST).expect("Minimum cost is valid"),
        )
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "Abcdef12";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, 17, "alice1")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "17");
        assert_eq!(decoded.username, "alice1");
        assert_eq!(decoded.exp - decoded.iat, 60 * 60);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("Abcdef12")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong", &hash, 17, "alice1");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_empty_hash_never_succeeds() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("", "", 3, "JaneDoe");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = authenticator();

        let token = authenticator
            .issue_token(5, "dave_user")
            .expect("Failed to generate token");

        let decoded = authenticator
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(decoded.sub, "5");
        assert_eq!(decoded.username, "dave_user");
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }
}
