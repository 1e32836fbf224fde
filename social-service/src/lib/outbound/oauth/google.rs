use async_trait::async_trait;
use serde::Deserialize;

use crate::config::GoogleConfig;
use crate::domain::auth::errors::OAuthError;
use crate::domain::auth::models::FederatedIdentity;
use crate::domain::auth::ports::IdentityProvider;

const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Google OAuth 2.0 identity provider.
pub struct GoogleIdentityProvider {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    client: reqwest::Client,
}

impl GoogleIdentityProvider {
    pub fn new(config: &GoogleConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self) -> String {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", "openid email profile"),
        ];

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", AUTHORIZATION_ENDPOINT, query)
    }

    async fn exchange_code(&self, code: &str) -> Result<FederatedIdentity, OAuthError> {
        let token_response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| OAuthError::Request(e.to_string()))?;

        if !token_response.status().is_success() {
            return Err(OAuthError::CodeRejected(
                token_response.status().to_string(),
            ));
        }

        let token: GoogleTokenResponse = token_response
            .json()
            .await
            .map_err(|e| OAuthError::Request(e.to_string()))?;

        let user_info: GoogleUserInfo = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| OAuthError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| OAuthError::Request(e.to_string()))?;

        user_info.into_identity()
    }
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    email: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
}

impl GoogleUserInfo {
    fn into_identity(self) -> Result<FederatedIdentity, OAuthError> {
        let email = self
            .email
            .filter(|email| !email.is_empty())
            .ok_or(OAuthError::IncompleteProfile("email"))?;

        Ok(FederatedIdentity {
            email,
            first_name: self.given_name.unwrap_or_default(),
            last_name: self.family_name.unwrap_or_default(),
        })
    }
}
