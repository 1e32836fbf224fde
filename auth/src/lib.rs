//! Authentication utilities library
//!
//! Provides the reusable authentication primitives of the social service:
//! - Password hashing (bcrypt, fixed cost)
//! - JWT token generation and validation
//! - Authentication coordination
//!
//! The service defines its own authentication ports and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4).unwrap();
//! let hash = hasher.hash("Abcdef12").unwrap();
//! assert!(hasher.verify("Abcdef12", &hash));
//! assert!(!hasher.verify("Abcdef12", ""));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user(1, "alice1", Duration::hours(1));
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.username, "alice1");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::hours(1),
//!     PasswordHasher::with_cost(4).unwrap(),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("Abcdef12").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("Abcdef12", &hash, 1, "alice1").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "1");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
