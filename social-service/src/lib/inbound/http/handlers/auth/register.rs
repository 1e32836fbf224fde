use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::inbound::http::extract::JsonBody;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref summary| ApiSuccess::new(StatusCode::CREATED, summary.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl RegisterRequest {
    pub(crate) fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(CreateUserCommand::new(username, email, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::PasswordPolicyError;
    use crate::user::errors::UsernameError;

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        let command = request("alice1", "a@x.com", "Abcdef12")
            .try_into_command()
            .unwrap();

        assert_eq!(command.username.as_str(), "alice1");
        assert_eq!(command.email.as_str(), "a@x.com");
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let err = request("", "a@x.com", "Abcdef12")
            .try_into_command()
            .unwrap_err();
        assert!(matches!(
            err,
            UserError::InvalidUsername(UsernameError::Empty)
        ));

        let err = request("alice1", "a@x.com", "")
            .try_into_command()
            .unwrap_err();
        assert!(matches!(
            err,
            UserError::InvalidPassword(PasswordPolicyError::Empty)
        ));
    }

    #[test]
    fn test_weak_password_is_rejected() {
        let err = request("alice1", "a@x.com", "abcdefgh")
            .try_into_command()
            .unwrap_err();

        assert!(matches!(
            ApiError::from(err),
            ApiError::BadRequest(msg) if msg.contains("uppercase")
        ));
    }
}
