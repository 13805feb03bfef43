//! Port for durable string key-value storage.
//!
//! Session and theme stores persist through this trait. Adapters live in
//! `outbound::storage`.

use super::define_port_error;

define_port_error! {
    /// Errors raised by key-value storage adapters.
    pub enum KeyValueStoreError {
        /// Backing storage could not be read.
        Read { message: String } => "key-value store read failed: {message}",
        /// Backing storage could not be written.
        Write { message: String } => "key-value store write failed: {message}",
    }
}

/// Durable `String -> String` storage.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Remove `key`; removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}
