//! # Key-value store abstraction
//!
//! [`KeyValueStore`] is the async interface every persistence backend
//! implements. It mirrors the multi-key calls a mobile async-storage API
//! offers: values are plain strings, and the multi-key variants apply to all
//! listed keys in one call, so callers that must keep several keys in step
//! (token and user) never observe one without the other.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`multi_get`](KeyValueStore::multi_get) | Values for each key, `None` where absent, in key order. |
//! | [`multi_set`](KeyValueStore::multi_set) | Writes every entry in one operation. |
//! | [`multi_remove`](KeyValueStore::multi_remove) | Removes every key in one operation. Missing keys are ignored. |
//! | [`get_item`](KeyValueStore::get_item) | Single-key convenience over `multi_get`. |
//!
//! Implementations: [`crate::MemoryStore`], [`crate::FileStore`].

use std::future::Future;

use crate::StorageError;

/// Async trait for durable string key-value storage.
pub trait KeyValueStore {
    fn multi_get(
        &self,
        keys: &[&str],
    ) -> impl Future<Output = Result<Vec<Option<String>>, StorageError>>;

    fn multi_set(
        &self,
        entries: &[(&str, &str)],
    ) -> impl Future<Output = Result<(), StorageError>>;

    fn multi_remove(&self, keys: &[&str]) -> impl Future<Output = Result<(), StorageError>>;

    fn get_item(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> {
        async move {
            let mut values = self.multi_get(&[key]).await?;
            Ok(values.pop().flatten())
        }
    }
}
