//! Domain primitives, stores, and use-cases.
//!
//! Purpose: hold the dashboard's behaviour independent of transport and
//! storage. Remote collaborators are reached only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, NewUser, UserPatch, UserId: directory records.
//! - SignInCredentials, SignUpDetails, AuthToken, AuthResponse: auth inputs
//!   and outputs.
//! - SessionStore, ThemeStore: persisted client state.
//! - AuthFlow: form-gated sign-in and sign-up.
//! - DashboardController: paginated, cached user list.
//! - forms: field declarations for every form.

pub mod auth;
pub mod auth_flow;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod ports;
pub mod session;
pub mod theme;
pub mod user;

pub use self::auth::{AuthResponse, AuthToken, AuthValidationError, SignInCredentials, SignUpDetails};
pub use self::auth_flow::{AuthFlow, AuthFlowError};
pub use self::dashboard::{DashboardController, PageCache, PageLoad, PageOutcome, PageTicket};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::session::SessionStore;
pub use self::theme::{ParseThemeError, Theme, ThemeStore};
pub use self::user::{NewUser, User, UserId, UserPatch};

use self::ports::{AuthServiceError, KeyValueStoreError, UserDirectoryError};

impl From<UserDirectoryError> for Error {
    fn from(value: UserDirectoryError) -> Self {
        match &value {
            UserDirectoryError::Transport { .. } | UserDirectoryError::Timeout { .. } => {
                Self::unavailable(value.to_string())
            }
            UserDirectoryError::NotFound { .. } => Self::not_found(value.to_string()),
            UserDirectoryError::Rejected { status: 401 | 403, .. } => {
                Self::unauthorized(value.to_string())
            }
            UserDirectoryError::Rejected { .. } => Self::invalid_request(value.to_string()),
            UserDirectoryError::Decode { .. } => Self::internal(value.to_string()),
        }
    }
}

impl From<AuthServiceError> for Error {
    fn from(value: AuthServiceError) -> Self {
        match &value {
            AuthServiceError::Rejected { .. } => Self::unauthorized(value.to_string()),
            AuthServiceError::Unavailable { .. } => Self::unavailable(value.to_string()),
        }
    }
}

impl From<KeyValueStoreError> for Error {
    fn from(value: KeyValueStoreError) -> Self {
        Self::internal(value.to_string())
    }
}

impl From<AuthFlowError> for Error {
    fn from(value: AuthFlowError) -> Self {
        match value {
            AuthFlowError::InvalidForm | AuthFlowError::PasswordMismatch => {
                Self::invalid_request(value.to_string())
            }
            AuthFlowError::Failed { message } => Self::unauthorized(message),
            AuthFlowError::Storage(err) => err.into(),
        }
    }
}

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use dashboard::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("user 7 not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
