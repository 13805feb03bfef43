//! Sign-in and sign-up submission gated by form validity.
//!
//! A submission is refused while the form is invalid. Sign-up additionally
//! re-checks that the password confirmation matches, since the confirmation
//! field is not re-validated when the password changes afterwards. On success
//! the session is logged in.

use std::sync::Arc;

use form_validation::{EQUALS_MESSAGE, FormValidation};
use thiserror::Error;
use tracing::{info, warn};

use super::forms::{CONFIRM_PASSWORD, EMAIL, FIRST_NAME, LAST_NAME, PASSWORD};
use super::ports::{AuthService, AuthServiceError, KeyValueStoreError};
use super::{SessionStore, SignInCredentials, SignUpDetails, User};

/// Shown when submitting a form that has errors or has not been touched.
pub const FIX_ERRORS_MESSAGE: &str = "Please fix the errors above";
/// Fallback when sign-in fails without a message.
pub const SIGN_IN_FAILED_MESSAGE: &str = "Sign in failed. Please check your credentials.";
/// Fallback when sign-up fails without a message.
pub const SIGN_UP_FAILED_MESSAGE: &str = "Sign up failed. Please try again.";

/// Reasons a sign-in or sign-up submission did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFlowError {
    /// The form is not valid.
    #[error("{}", FIX_ERRORS_MESSAGE)]
    InvalidForm,
    /// Sign-up password and confirmation differ.
    #[error("{}", EQUALS_MESSAGE)]
    PasswordMismatch,
    /// The auth service refused or failed; the message is user-facing.
    #[error("{message}")]
    Failed {
        /// User-facing message.
        message: String,
    },
    /// The session could not be persisted.
    #[error(transparent)]
    Storage(#[from] KeyValueStoreError),
}

/// Sign-in and sign-up use-cases.
pub struct AuthFlow {
    service: Arc<dyn AuthService>,
}

impl AuthFlow {
    /// Flow over `service`.
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }

    /// Submit the sign-in form and log the session in.
    pub async fn sign_in(
        &self,
        form: &FormValidation,
        session: &mut SessionStore,
    ) -> Result<User, AuthFlowError> {
        if !form.is_valid() {
            return Err(AuthFlowError::InvalidForm);
        }
        let credentials =
            SignInCredentials::try_from_parts(field(form, EMAIL), field(form, PASSWORD))
                .map_err(|_| AuthFlowError::InvalidForm)?;
        let response = self
            .service
            .sign_in(&credentials)
            .await
            .map_err(|err| failure(&err, SIGN_IN_FAILED_MESSAGE))?;
        session.login(response.token, response.user.clone())?;
        info!(user_id = %response.user.id, "signed in");
        Ok(response.user)
    }

    /// Submit the sign-up form and log the new session in.
    pub async fn sign_up(
        &self,
        form: &FormValidation,
        session: &mut SessionStore,
    ) -> Result<User, AuthFlowError> {
        if !form.is_valid() {
            return Err(AuthFlowError::InvalidForm);
        }
        if field(form, PASSWORD) != field(form, CONFIRM_PASSWORD) {
            return Err(AuthFlowError::PasswordMismatch);
        }
        let details = SignUpDetails::try_from_parts(
            field(form, EMAIL),
            field(form, PASSWORD),
            field(form, FIRST_NAME),
            field(form, LAST_NAME),
        )
        .map_err(|_| AuthFlowError::InvalidForm)?;
        let response = self
            .service
            .sign_up(&details)
            .await
            .map_err(|err| failure(&err, SIGN_UP_FAILED_MESSAGE))?;
        session.login(response.token, response.user.clone())?;
        info!(user_id = %response.user.id, "signed up");
        Ok(response.user)
    }
}

fn field<'a>(form: &'a FormValidation, name: &str) -> &'a str {
    form.value(name).unwrap_or_default()
}

fn failure(err: &AuthServiceError, fallback: &str) -> AuthFlowError {
    warn!(error = %err, "auth request failed");
    let message = err.to_string();
    AuthFlowError::Failed {
        message: if message.trim().is_empty() {
            fallback.to_owned()
        } else {
            message
        },
    }
}
