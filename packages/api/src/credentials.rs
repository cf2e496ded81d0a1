//! # Persisted credential
//!
//! [`CredentialStore`] keeps the bearer token and the signed-in user on top
//! of any [`KeyValueStore`], under two keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`TOKEN_KEY`] (`"token"`) | the raw token string |
//! | [`USER_KEY`] (`"user"`) | the [`UserRecord`] serialized as JSON |
//!
//! Both keys are always written and removed in a single multi-key call. A
//! half-present pair (token without user or the reverse) reads as no
//! credential at all; [`Session::restore`](crate::Session::restore) removes
//! it.

use store::{KeyValueStore, StorageError};

use crate::models::UserRecord;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Token and user, always stored and cleared together.
#[derive(Clone, Debug, PartialEq)]
pub struct Credential {
    pub token: String,
    pub user: UserRecord,
}

/// Contents of the credential keys.
#[derive(Clone, Debug, PartialEq)]
pub enum StoredCredential {
    Absent,
    /// Only one of the two keys is set.
    Incomplete,
    Present(Credential),
}

impl StoredCredential {
    pub fn into_credential(self) -> Option<Credential> {
        match self {
            StoredCredential::Present(credential) => Some(credential),
            StoredCredential::Absent | StoredCredential::Incomplete => None,
        }
    }
}

/// Token/user persistence over a key-value backend.
#[derive(Clone, Debug)]
pub struct CredentialStore<S> {
    kv: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// The underlying key-value store.
    pub fn backend(&self) -> &S {
        &self.kv
    }

    pub async fn set(&self, token: &str, user: &UserRecord) -> Result<(), StorageError> {
        let user = serde_json::to_string(user).map_err(|e| StorageError::corrupt(USER_KEY, e))?;
        self.kv
            .multi_set(&[(TOKEN_KEY, token), (USER_KEY, user.as_str())])
            .await
    }

    /// What the two keys currently hold, including a half-written pair.
    pub async fn load(&self) -> Result<StoredCredential, StorageError> {
        let mut values = self.kv.multi_get(&[TOKEN_KEY, USER_KEY]).await?.into_iter();
        let token = values.next().flatten();
        let user = values.next().flatten();

        match (token, user) {
            (Some(token), Some(user)) => {
                let user = serde_json::from_str(&user).map_err(|e| StorageError::corrupt(USER_KEY, e))?;
                Ok(StoredCredential::Present(Credential { token, user }))
            }
            (None, None) => Ok(StoredCredential::Absent),
            (token, _) => {
                tracing::warn!(has_token = token.is_some(), "incomplete stored credential");
                Ok(StoredCredential::Incomplete)
            }
        }
    }

    /// The stored pair, or `None` when either half is missing.
    pub async fn get(&self) -> Result<Option<Credential>, StorageError> {
        self.load().await.map(StoredCredential::into_credential)
    }

    /// Just the token, as attached to outgoing requests.
    pub async fn token(&self) -> Result<Option<String>, StorageError> {
        self.kv.get_item(TOKEN_KEY).await
    }

    /// Just the stored user.
    pub async fn user(&self) -> Result<Option<UserRecord>, StorageError> {
        match self.kv.get_item(USER_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StorageError::corrupt(USER_KEY, e)),
            None => Ok(None),
        }
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.kv.multi_remove(&[TOKEN_KEY, USER_KEY]).await
    }
}
