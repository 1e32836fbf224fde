use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// `password_hash` is empty for accounts created through a federated login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User record before the store assigns its identifier and creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Public view of a user; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// User unique identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(UserId(id)),
            Ok(id) => Err(UserIdError::InvalidFormat(format!("{} is not positive", id))),
            Err(e) => Err(UserIdError::InvalidFormat(e.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 4-20 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub const MIN_LENGTH: usize = 4;
    pub const MAX_LENGTH: usize = 20;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is empty
    /// * `TooShort` - Username shorter than 4 characters
    /// * `TooLong` - Username longer than 20 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length == 0 {
            Err(UsernameError::Empty)
        } else if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    /// Derive a username from a federated profile.
    ///
    /// First and last name are concatenated without separator and without
    /// any length or uniqueness check; a collision is reported by the store.
    pub fn from_federated_profile(first_name: &str, last_name: &str) -> Self {
        Self(format!("{}{}", first_name, last_name))
    }

    /// Wrap a username already accepted by the store.
    pub(crate) fn new_unchecked(username: String) -> Self {
        Self(username)
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Empty` - Email is empty
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Wrap an email already accepted by the store or an identity provider.
    pub(crate) fn new_unchecked(email: String) -> Self {
        Self(email)
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the complexity policy.
///
/// At least 8 characters with one uppercase letter, one lowercase letter and
/// one digit. Only ASCII letters, digits and `@$!%*?&` are accepted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 8;
    pub const SPECIAL_CHARACTERS: &'static str = "@$!%*?&";

    /// Check a candidate against the policy.
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    /// * `TooShort` - Fewer than 8 characters
    /// * `InvalidCharacters` - Contains characters outside the allowed set
    /// * `MissingUppercase` / `MissingLowercase` / `MissingDigit`
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length == 0 {
            return Err(PasswordPolicyError::Empty);
        }
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if !password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || Self::SPECIAL_CHARACTERS.contains(c))
        {
            return Err(PasswordPolicyError::InvalidCharacters);
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }

        Ok(Self(password))
    }

    /// Plaintext, only meant to be handed to the hasher.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl CreateUserCommand {
    pub fn new(username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert!(Username::new("abcd".to_string()).is_ok());
        assert!(Username::new("a".repeat(20)).is_ok());
        assert_eq!(Username::new(String::new()), Err(UsernameError::Empty));
        assert_eq!(
            Username::new("abc".to_string()),
            Err(UsernameError::TooShort { min: 4, actual: 3 })
        );
        assert_eq!(
            Username::new("a".repeat(21)),
            Err(UsernameError::TooLong {
                max: 20,
                actual: 21
            })
        );
    }

    #[test]
    fn test_federated_username_is_not_validated() {
        let username = Username::from_federated_profile("Jo", "");
        assert_eq!(username.as_str(), "Jo");

        let username = Username::from_federated_profile("Jane", "Doe");
        assert_eq!(username.as_str(), "JaneDoe");
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("a@x.com".to_string()).is_ok());
        assert_eq!(EmailAddress::new(String::new()), Err(EmailError::Empty));
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_password_policy_accepts() {
        assert!(Password::new("Abcdef12".to_string()).is_ok());
        assert!(Password::new("Abcdef12@$!".to_string()).is_ok());
    }

    #[test]
    fn test_password_policy_rejects() {
        assert_eq!(Password::new(String::new()), Err(PasswordPolicyError::Empty));
        assert_eq!(
            Password::new("Abc12".to_string()),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 5 })
        );
        assert_eq!(
            Password::new("abcdef12".to_string()),
            Err(PasswordPolicyError::MissingUppercase)
        );
        assert_eq!(
            Password::new("ABCDEF12".to_string()),
            Err(PasswordPolicyError::MissingLowercase)
        );
        assert_eq!(
            Password::new("Abcdefgh".to_string()),
            Err(PasswordPolicyError::MissingDigit)
        );
        assert_eq!(
            Password::new("Abcdef12 #".to_string()),
            Err(PasswordPolicyError::InvalidCharacters)
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("Abcdef12".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(<redacted>)");
    }

    #[test]
    fn test_user_id_from_string() {
        assert_eq!(UserId::from_string("42"), Ok(UserId(42)));
        assert!(UserId::from_string("0").is_err());
        assert!(UserId::from_string("abc").is_err());
    }

    #[test]
    fn test_summary_drops_password_hash() {
        let user = User {
            id: UserId(1),
            username: Username::new("alice1".to_string()).unwrap(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            password_hash: "$2b$10$hash".to_string(),
            created_at: Utc::now(),
        };

        let summary = UserSummary::from(&user);
        assert_eq!(summary.id, user.id);
        assert_eq!(summary.username, user.username);
        assert_eq!(summary.created_at, user.created_at);
    }
}
