//! Authentication primitives: credentials, sign-up details, and tokens.
//!
//! Constructors validate raw strings before a flow talks to the auth port.
//! Passwords are held in [`Zeroizing`] buffers and never appear in `Debug`
//! output.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

use super::User;

/// Raised when credential values are blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

fn normalise_email(email: &str) -> Result<String, AuthValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(AuthValidationError::EmptyEmail);
    }
    Ok(trimmed.to_owned())
}

fn checked_password(password: &str) -> Result<Zeroizing<String>, AuthValidationError> {
    if password.is_empty() {
        return Err(AuthValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty; whitespace is preserved.
///
/// # Examples
/// ```
/// use dashboard::domain::SignInCredentials;
///
/// let creds = SignInCredentials::try_from_parts(" ada@example.com ", "secret").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert!(!format!("{creds:?}").contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        Ok(Self {
            email: normalise_email(email)?,
            password: checked_password(password)?,
        })
    }

    /// Email used to sign in.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignInCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Validated sign-up details.
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpDetails {
    email: String,
    password: Zeroizing<String>,
    first_name: String,
    last_name: String,
}

impl SignUpDetails {
    /// Construct sign-up details from raw inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Self, AuthValidationError> {
        Ok(Self {
            email: normalise_email(email)?,
            password: checked_password(password)?,
            first_name: first_name.trim().to_owned(),
            last_name: last_name.trim().to_owned(),
        })
    }

    /// Email of the new account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }
}

impl fmt::Debug for SignUpDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpDetails")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// Bearer token issued on sign-in; sent as the directory API key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw token value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Result of a successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Issued token.
    pub token: AuthToken,
    /// Signed-in user.
    pub user: User,
}
