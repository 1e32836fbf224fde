use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by an access token.
///
/// Registered claims `sub`, `iat` and `exp` follow RFC 7519; `username` is
/// carried alongside so handlers can log without a store lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Username at the time of issuance
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, valid for `lifetime` from now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username stored in the token
    /// * `lifetime` - Time until the token expires
    pub fn for_user(
        user_id: impl ToString,
        username: impl Into<String>,
        lifetime: Duration,
    ) -> Self {
        Self::issued_at(user_id, username, Utc::now(), lifetime)
    }

    /// Create claims with an explicit issuance instant.
    pub fn issued_at(
        user_id: impl ToString,
        username: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            username: username.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
