//! Signed-in session state persisted across runs.
//!
//! The session lives under two storage keys: `authToken` holds the raw token
//! and `authUser` the JSON-encoded user. A session is restored only when both
//! are present and the user decodes.

use std::sync::Arc;

use tracing::{debug, warn};

use super::ports::{KeyValueStore, KeyValueStoreError};
use super::{AuthToken, User};

/// Storage key for the session token.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key for the JSON-encoded session user.
pub const AUTH_USER_KEY: &str = "authUser";

/// Session state backed by durable storage.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use dashboard::domain::{AuthToken, NewUser, SessionStore, User, UserId};
/// use dashboard::outbound::storage::MemoryKeyValueStore;
///
/// let storage = Arc::new(MemoryKeyValueStore::default());
/// let mut session = SessionStore::init(storage.clone());
/// assert!(!session.is_authenticated());
///
/// let user = User::from_new(UserId::new(1), NewUser::new("a@b.com", "Ada", "Lovelace"));
/// session.login(AuthToken::new("token"), user).expect("persist session");
///
/// let restored = SessionStore::init(storage);
/// assert!(restored.is_authenticated());
/// ```
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    token: Option<AuthToken>,
    user: Option<User>,
}

impl SessionStore {
    /// Restore the session from `storage`.
    ///
    /// Unreadable storage or an undecodable user yields a signed-out session.
    pub fn init(storage: Arc<dyn KeyValueStore>) -> Self {
        let restored = match restore(storage.as_ref()) {
            Ok(restored) => restored,
            Err(error) => {
                warn!(error = %error, "session storage unreadable; starting signed out");
                None
            }
        };
        let (token, user) = match restored {
            Some((token, user)) => (Some(token), Some(user)),
            None => (None, None),
        };
        Self {
            storage,
            token,
            user,
        }
    }

    /// Record a signed-in session and persist it.
    ///
    /// Memory is updated only after both keys are written.
    pub fn login(&mut self, token: AuthToken, user: User) -> Result<(), KeyValueStoreError> {
        let encoded = serde_json::to_string(&user)
            .map_err(|error| KeyValueStoreError::write(format!("encode session user: {error}")))?;
        self.storage.set(AUTH_TOKEN_KEY, token.as_str())?;
        self.storage.set(AUTH_USER_KEY, &encoded)?;
        debug!(user_id = %user.id, "session stored");
        self.token = Some(token);
        self.user = Some(user);
        Ok(())
    }

    /// Clear the session in memory and in storage.
    ///
    /// Memory is always cleared; the first storage failure is returned after
    /// both removals have been attempted.
    pub fn logout(&mut self) -> Result<(), KeyValueStoreError> {
        self.token = None;
        self.user = None;
        let token_removed = self.storage.remove(AUTH_TOKEN_KEY);
        let user_removed = self.storage.remove(AUTH_USER_KEY);
        token_removed.and(user_removed)
    }

    /// Log out and release the store.
    pub fn teardown(mut self) -> Result<(), KeyValueStoreError> {
        self.logout()
    }

    /// Whether both a token and a user are present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Current token.
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Current user.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

fn restore(storage: &dyn KeyValueStore) -> Result<Option<(AuthToken, User)>, KeyValueStoreError> {
    let (Some(token), Some(raw_user)) = (storage.get(AUTH_TOKEN_KEY)?, storage.get(AUTH_USER_KEY)?)
    else {
        return Ok(None);
    };
    if token.is_empty() || raw_user.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<User>(&raw_user) {
        Ok(user) => Ok(Some((AuthToken::new(token), user))),
        Err(error) => {
            warn!(error = %error, "stored session user is invalid; ignoring");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockKeyValueStore;
    use crate::domain::{NewUser, UserId};
    use crate::outbound::storage::MemoryKeyValueStore;
    use rstest::{fixture, rstest};

    #[fixture]
    fn storage() -> Arc<MemoryKeyValueStore> {
        Arc::new(MemoryKeyValueStore::default())
    }

    fn ada() -> User {
        User::from_new(
            UserId::new(1),
            NewUser::new("ada@example.com", "ada@example.com", "User"),
        )
    }

    #[rstest]
    fn empty_storage_starts_signed_out(storage: Arc<MemoryKeyValueStore>) {
        let session = SessionStore::init(storage);
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[rstest]
    fn login_round_trips_through_storage(storage: Arc<MemoryKeyValueStore>) {
        let mut session = SessionStore::init(storage.clone());
        session
            .login(AuthToken::new("reqres-free-v1"), ada())
            .expect("login persists");

        assert_eq!(
            storage.get(AUTH_TOKEN_KEY).expect("read token").as_deref(),
            Some("reqres-free-v1")
        );
        let restored = SessionStore::init(storage);
        assert!(restored.is_authenticated());
        assert_eq!(restored.user(), Some(&ada()));
        assert_eq!(
            restored.token().map(AuthToken::as_str),
            Some("reqres-free-v1")
        );
    }

    #[rstest]
    fn logout_clears_memory_and_storage(storage: Arc<MemoryKeyValueStore>) {
        let mut session = SessionStore::init(storage.clone());
        session
            .login(AuthToken::new("t"), ada())
            .expect("login persists");
        session.logout().expect("logout");

        assert!(!session.is_authenticated());
        assert_eq!(storage.get(AUTH_TOKEN_KEY).expect("read"), None);
        assert_eq!(storage.get(AUTH_USER_KEY).expect("read"), None);
    }

    #[rstest]
    fn token_without_user_is_not_restored(storage: Arc<MemoryKeyValueStore>) {
        storage.set(AUTH_TOKEN_KEY, "t").expect("seed token");
        assert!(!SessionStore::init(storage).is_authenticated());
    }

    #[rstest]
    fn undecodable_user_is_not_restored(storage: Arc<MemoryKeyValueStore>) {
        storage.set(AUTH_TOKEN_KEY, "t").expect("seed token");
        storage.set(AUTH_USER_KEY, "{not json").expect("seed user");
        assert!(!SessionStore::init(storage).is_authenticated());
    }

    #[rstest]
    fn failed_persist_leaves_session_signed_out() {
        let mut storage = MockKeyValueStore::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|_, _| Err(KeyValueStoreError::write("disk full")));
        let mut session = SessionStore::init(Arc::new(storage));

        let result = session.login(AuthToken::new("t"), ada());

        assert!(matches!(result, Err(KeyValueStoreError::Write { .. })));
        assert!(!session.is_authenticated());
    }

    #[rstest]
    fn unreadable_storage_starts_signed_out() {
        let mut storage = MockKeyValueStore::new();
        storage
            .expect_get()
            .returning(|_| Err(KeyValueStoreError::read("permission denied")));
        assert!(!SessionStore::init(Arc::new(storage)).is_authenticated());
    }
}
