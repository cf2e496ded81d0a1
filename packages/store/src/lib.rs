//! # Local key-value persistence for the notes client
//!
//! The client keeps a handful of string values (the bearer token and the
//! serialized signed-in user) across app restarts. Everything goes through
//! the [`KeyValueStore`] trait so the credential logic in the `api` crate is
//! identical against the in-memory backend used by tests and the file-backed
//! backend used on device.

mod error;
mod file_store;
pub mod kv;
mod memory;

pub use error::StorageError;
pub use file_store::FileStore;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
