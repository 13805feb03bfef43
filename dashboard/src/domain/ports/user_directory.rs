//! Driven port for the remote user directory.
//!
//! The dashboard controller reads paged listings and issues create, update,
//! and delete calls through this trait. The production adapter talks HTTP
//! (see `outbound::reqres`); tests substitute a mock.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{NewUser, User, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// The request could not be sent or the connection failed.
        Transport { message: String } => "user directory transport failed: {message}",
        /// The request did not complete in time.
        Timeout { message: String } => "user directory request timed out: {message}",
        /// The directory has no such record.
        NotFound { message: String } => "user directory record not found: {message}",
        /// The directory rejected the request.
        Rejected { status: u16, message: String } =>
            "user directory rejected request with status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "user directory response invalid: {message}",
    }
}

/// Port for paged listing and mutation of remote user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch one page of users.
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, UserDirectoryError>;

    /// Fetch a single user.
    async fn get_user(&self, id: UserId) -> Result<User, UserDirectoryError>;

    /// Create a user.
    ///
    /// Returns the identifier the directory reports, or `None` when the
    /// response omits it.
    async fn create_user(&self, user: &NewUser) -> Result<Option<UserId>, UserDirectoryError>;

    /// Apply a partial update and return the directory's view of the record.
    ///
    /// Fields the directory does not echo back are blank in the result.
    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, UserDirectoryError>;

    /// Delete a user.
    async fn delete_user(&self, id: UserId) -> Result<(), UserDirectoryError>;
}

/// Fixture directory with no records that acknowledges every mutation.
///
/// Useful where directory behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, UserDirectoryError> {
        Ok(Page::new(request, 0, Vec::new()))
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserDirectoryError> {
        Err(UserDirectoryError::not_found(format!("user {id}")))
    }

    async fn create_user(&self, _user: &NewUser) -> Result<Option<UserId>, UserDirectoryError> {
        Ok(None)
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, UserDirectoryError> {
        let mut user = User::blank(id);
        user.apply(patch);
        Ok(user)
    }

    async fn delete_user(&self, _id: UserId) -> Result<(), UserDirectoryError> {
        Ok(())
    }
}
