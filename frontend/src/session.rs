use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::AUTH_STORAGE_KEY;
use crate::error::AuthError;
use crate::storage::KeyValueStore;

const AUTHENTICATED_FLAG: &str = "true";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AuthStatus {
    Checking,
    Authenticated,
    Unauthenticated,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Remote endpoint that accepts or rejects a set of credentials.
#[async_trait(?Send)]
pub trait AuthGateway {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), AuthError>;
}

/// Client-side session. Owns the persisted authenticated flag; nothing else
/// reads or writes that key.
pub struct SessionState<S: KeyValueStore> {
    store: S,
    authenticated: bool,
}

impl<S: KeyValueStore> SessionState<S> {
    /// Restores the session from durable storage. A storage that cannot be
    /// read counts as logged out.
    pub fn initialize(store: S) -> Self {
        let authenticated = match store.get(AUTH_STORAGE_KEY) {
            Ok(value) => value.as_deref() == Some(AUTHENTICATED_FLAG),
            Err(e) => {
                log::warn!("Could not read session flag: {}", e);
                false
            }
        };
        log::debug!("Session restored, authenticated={}", authenticated);
        Self {
            store,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn status(&self) -> AuthStatus {
        if self.authenticated {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Unauthenticated
        }
    }

    /// Sends the credentials once. Only a successful answer touches state.
    pub async fn login<G>(
        &mut self,
        gateway: &G,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError>
    where
        G: AuthGateway + ?Sized,
    {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        match gateway.authenticate(&credentials).await {
            Ok(()) => {
                self.authenticated = true;
                if let Err(e) = self.store.set(AUTH_STORAGE_KEY, AUTHENTICATED_FLAG) {
                    log::warn!("Logged in but could not persist session flag: {}", e);
                }
                log::info!("Logged in as {}", credentials.username);
                Ok(())
            }
            Err(AuthError::Transport(detail)) => {
                log::error!("Login request failed: {}", detail);
                Err(AuthError::Transport(detail))
            }
            Err(e) => {
                log::info!("Login rejected: {}", e);
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        if let Err(e) = self.store.remove(AUTH_STORAGE_KEY) {
            log::warn!("Could not clear session flag: {}", e);
        }
        log::info!("Logged out");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::executor::block_on;

    use super::*;
    use crate::error::{StorageError, LOGIN_FAILED_MESSAGE};
    use crate::storage::MemoryStore;

    struct FakeGateway {
        result: Result<(), AuthError>,
        calls: Cell<usize>,
        last_username: RefCell<Option<String>>,
    }

    impl FakeGateway {
        fn new(result: Result<(), AuthError>) -> Self {
            Self {
                result,
                calls: Cell::new(0),
                last_username: RefCell::new(None),
            }
        }
    }

    #[async_trait(?Send)]
    impl AuthGateway for FakeGateway {
        async fn authenticate(&self, credentials: &Credentials) -> Result<(), AuthError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_username.borrow_mut() = Some(credentials.username.clone());
            self.result.clone()
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_initialize_without_flag_is_unauthenticated() {
        let session = SessionState::initialize(MemoryStore::new());
        assert!(!session.is_authenticated());
        assert_eq!(session.status(), AuthStatus::Unauthenticated);
    }

    #[test]
    fn test_initialize_with_flag_is_authenticated() {
        let store = MemoryStore::new();
        store.set(AUTH_STORAGE_KEY, "true").unwrap();
        let session = SessionState::initialize(store);
        assert_eq!(session.status(), AuthStatus::Authenticated);
    }

    #[test]
    fn test_initialize_ignores_other_flag_values() {
        let store = MemoryStore::new();
        store.set(AUTH_STORAGE_KEY, "TRUE").unwrap();
        assert!(!SessionState::initialize(store).is_authenticated());
    }

    #[test]
    fn test_initialize_with_unreadable_storage() {
        let session = SessionState::initialize(BrokenStore);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_success_persists_flag() {
        let store = MemoryStore::new();
        let mut session = SessionState::initialize(store.clone());
        let gateway = FakeGateway::new(Ok(()));

        let result = block_on(session.login(&gateway, "alice", "secret"));

        assert_eq!(result, Ok(()));
        assert!(session.is_authenticated());
        assert_eq!(store.get(AUTH_STORAGE_KEY).unwrap(), Some("true".to_string()));
        assert_eq!(gateway.last_username.borrow().as_deref(), Some("alice"));
    }

    #[test]
    fn test_login_rejected_leaves_session_untouched() {
        let store = MemoryStore::new();
        let mut session = SessionState::initialize(store.clone());
        let gateway = FakeGateway::new(Err(AuthError::Rejected(
            "Invalid credentials".to_string(),
        )));

        let result = block_on(session.login(&gateway, "alice", "wrong"));

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!session.is_authenticated());
        assert_eq!(store.get(AUTH_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_login_transport_failure_is_generic_and_not_retried() {
        let mut session = SessionState::initialize(MemoryStore::new());
        let gateway = FakeGateway::new(Err(AuthError::Transport("offline".to_string())));

        let err = block_on(session.login(&gateway, "alice", "secret")).unwrap_err();

        assert_eq!(err.to_string(), LOGIN_FAILED_MESSAGE);
        assert_eq!(gateway.calls.get(), 1);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_succeeds_even_if_flag_cannot_be_saved() {
        let mut session = SessionState::initialize(BrokenStore);
        let gateway = FakeGateway::new(Ok(()));
        assert!(block_on(session.login(&gateway, "alice", "secret")).is_ok());
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_flag() {
        let store = MemoryStore::new();
        store.set(AUTH_STORAGE_KEY, "true").unwrap();
        let mut session = SessionState::initialize(store.clone());

        session.logout();

        assert!(!session.is_authenticated());
        assert_eq!(store.get(AUTH_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret"));
    }
}
