//! Driving port for sign-in and sign-up.
//!
//! Auth flows call this port once the form gate passes. The shipped
//! implementation is a mock that accepts any credentials.

use async_trait::async_trait;
use tracing::info;

use crate::domain::{AuthResponse, AuthToken, SignInCredentials, SignUpDetails, User, UserId};

use super::define_port_error;

/// Token issued by [`FixtureAuthService`]; also accepted as the directory API key.
pub const MOCK_AUTH_TOKEN: &str = "reqres-free-v1";

define_port_error! {
    /// Errors raised by auth service adapters.
    pub enum AuthServiceError {
        /// Credentials or details were refused; `message` is user-facing.
        Rejected { message: String } => "{message}",
        /// The service could not be reached.
        Unavailable { message: String } => "auth service unavailable: {message}",
    }
}

/// Port for account authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate existing credentials.
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthResponse, AuthServiceError>;

    /// Register a new account and sign it in.
    async fn sign_up(&self, details: &SignUpDetails) -> Result<AuthResponse, AuthServiceError>;
}

/// Mock authenticator: any credentials succeed with a fixed token and user id 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthService;

#[async_trait]
impl AuthService for FixtureAuthService {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthResponse, AuthServiceError> {
        info!(email = credentials.email(), "mock sign-in");
        Ok(AuthResponse {
            token: AuthToken::new(MOCK_AUTH_TOKEN),
            user: User {
                id: UserId::new(1),
                email: credentials.email().to_owned(),
                first_name: credentials.email().to_owned(),
                last_name: "User".to_owned(),
                avatar: None,
            },
        })
    }

    async fn sign_up(&self, details: &SignUpDetails) -> Result<AuthResponse, AuthServiceError> {
        info!(
            email = details.email(),
            first_name = details.first_name(),
            last_name = details.last_name(),
            "mock sign-up"
        );
        Ok(AuthResponse {
            token: AuthToken::new(MOCK_AUTH_TOKEN),
            user: User {
                id: UserId::new(1),
                email: details.email().to_owned(),
                first_name: details.first_name().to_owned(),
                last_name: details.last_name().to_owned(),
                avatar: None,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn sign_in_uses_email_as_first_name() {
        let creds = SignInCredentials::try_from_parts("ada@example.com", "anything")
            .expect("credentials shape");
        let response = FixtureAuthService.sign_in(&creds).await.expect("mock sign-in");

        assert_eq!(response.token.as_str(), MOCK_AUTH_TOKEN);
        assert_eq!(response.user.id, UserId::new(1));
        assert_eq!(response.user.email, "ada@example.com");
        assert_eq!(response.user.first_name, "ada@example.com");
        assert_eq!(response.user.last_name, "User");
    }

    #[rstest]
    #[tokio::test]
    async fn sign_up_echoes_names() {
        let details = SignUpDetails::try_from_parts("ada@example.com", "secret1", "Ada", "Lovelace")
            .expect("details shape");
        let response = FixtureAuthService.sign_up(&details).await.expect("mock sign-up");

        assert_eq!(response.token.as_str(), MOCK_AUTH_TOKEN);
        assert_eq!(response.user.id, UserId::new(1));
        assert_eq!(response.user.first_name, "Ada");
        assert_eq!(response.user.last_name, "Lovelace");
    }

    #[rstest]
    fn rejected_error_displays_message_verbatim() {
        let err = AuthServiceError::rejected("Account locked");
        assert_eq!(err.to_string(), "Account locked");
    }
}
