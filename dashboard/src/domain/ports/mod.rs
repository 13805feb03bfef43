//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod key_value_store;
mod user_directory;

#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::{AuthService, AuthServiceError, FixtureAuthService, MOCK_AUTH_TOKEN};
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{KeyValueStore, KeyValueStoreError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
