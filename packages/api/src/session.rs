//! # Session state
//!
//! [`Session`] owns the process-wide sign-in state: the token, the user, and
//! whether the one-time restore from storage has finished. It is constructed
//! explicitly at startup and handed to whatever needs it (the UI context,
//! the [`ForcedLogout`](crate::ForcedLogout) interceptor); clones share the
//! same state.
//!
//! Only three operations mutate it:
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`restore`](Session::restore) | Reads the stored credential, populates token/user, clears `is_loading`. |
//! | [`login`](Session::login) | Authenticates, persists the credential, then publishes it. |
//! | [`logout`](Session::logout) | Clears the stored credential, then the in-memory state. Idempotent. |
//!
//! Observers either take a snapshot with [`state`](Session::state) or follow
//! changes through [`subscribe`](Session::subscribe).
//!
//! ## Ordering
//!
//! The storage write and state publication of each operation run under one
//! async mutex, so operations commit one at a time and each commit leaves
//! store and memory in agreement. The login network call happens outside
//! the mutex: a 401 answer to it runs the forced logout, which needs that
//! mutex. Two overlapping logins therefore both reach the server and the
//! one that completes last is the one that sticks.

use std::sync::Arc;

use store::{KeyValueStore, StorageError};
use tokio::sync::{watch, Mutex};

use crate::client::ApiClient;
use crate::credentials::{Credential, CredentialStore, StoredCredential};
use crate::error::ApiError;
use crate::models::UserRecord;

/// Snapshot of the sign-in state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<UserRecord>,
    /// True until the first [`Session::restore`] completes.
    pub is_loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: true,
        }
    }
}

impl SessionState {
    fn signed_in(credential: Credential) -> Self {
        Self {
            token: Some(credential.token),
            user: Some(credential.user),
            is_loading: false,
        }
    }

    fn signed_out() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

struct Inner<S> {
    credentials: CredentialStore<S>,
    state: watch::Sender<SessionState>,
    commit: Mutex<()>,
}

/// Shared handle to the sign-in state.
pub struct Session<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for Session<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> PartialEq for Session<S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> Session<S> {
    /// A session in the loading state; call [`restore`](Self::restore) next.
    pub fn new(credentials: CredentialStore<S>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(Inner {
                credentials,
                state,
                commit: Mutex::new(()),
            }),
        }
    }

    pub fn credentials(&self) -> &CredentialStore<S> {
        &self.inner.credentials
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that is notified after every completed mutation.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<UserRecord> {
        self.inner.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    /// Load the stored credential into memory. Safe to call again; each call
    /// re-reads storage. A half-stored credential is removed so its token is
    /// never attached to a request. A storage failure still ends the loading
    /// state (signed out) and is returned to the caller.
    pub async fn restore(&self) -> Result<(), StorageError> {
        let _commit = self.inner.commit.lock().await;
        let stored = self.inner.credentials.load().await;

        let (state, result) = match stored {
            Ok(StoredCredential::Present(credential)) => (SessionState::signed_in(credential), Ok(())),
            Ok(StoredCredential::Absent) => (SessionState::signed_out(), Ok(())),
            Ok(StoredCredential::Incomplete) => {
                tracing::info!("discarding incomplete stored credential");
                (SessionState::signed_out(), self.inner.credentials.clear().await)
            }
            Err(e) => (SessionState::signed_out(), Err(e)),
        };
        tracing::info!(authenticated = state.is_authenticated(), "session restored");
        self.inner.state.send_replace(state);
        result
    }

    /// Authenticate against the API, persist the credential, then publish it.
    /// On any failure the session is left as it was and the error returned.
    pub async fn login(&self, client: &ApiClient<S>, email: &str, password: &str) -> Result<(), ApiError> {
        let response = client.login(email, password).await?;

        let _commit = self.inner.commit.lock().await;
        self.inner
            .credentials
            .set(&response.token, &response.user)
            .await?;
        tracing::info!(user = %response.user.id, "signed in");
        self.inner.state.send_replace(SessionState::signed_in(Credential {
            token: response.token,
            user: response.user,
        }));
        Ok(())
    }

    /// Clear the stored credential and the in-memory state. Calling this
    /// while signed out is a no-op apart from the notification. The
    /// in-memory state is cleared even if storage fails; that failure is
    /// returned.
    pub async fn logout(&self) -> Result<(), StorageError> {
        let _commit = self.inner.commit.lock().await;
        let cleared = self.inner.credentials.clear().await;
        self.inner.state.send_replace(SessionState::signed_out());
        tracing::info!("signed out");
        cleared
    }
}
