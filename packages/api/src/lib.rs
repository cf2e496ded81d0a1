//! # API crate — notes API client and session lifecycle
//!
//! This crate is everything the notes app does besides drawing screens. It
//! talks to the external notes REST API, keeps the signed-in credential on
//! device, and owns the session state the UI reads.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`credentials`] | Token + user persisted together on a [`store::KeyValueStore`] |
//! | [`session`] | Process-wide sign-in state with `restore` / `login` / `logout` |
//! | [`client`] | HTTP client that attaches the bearer token and runs response interceptors |
//! | [`interceptor`] | The interceptor hook and [`ForcedLogout`], which signs out on 401 |
//! | [`endpoints`] | Typed auth and note calls |
//! | [`models`] | `UserRecord`, `Note`, `NoteDraft`, `ResourceId` |
//! | [`validation`] | Client-side form checks |
//! | [`config`] | `notes-client.toml` settings |
//!
//! ## Wiring
//!
//! ```no_run
//! # async fn run() -> Result<(), api::ApiError> {
//! use api::{ApiClient, ClientConfig, CredentialStore, ForcedLogout, Session};
//! use store::FileStore;
//!
//! let config = ClientConfig::default().with_env_overrides();
//! let credentials = CredentialStore::new(FileStore::for_namespace(&config.storage.namespace));
//! let session = Session::new(credentials.clone());
//! let client = ApiClient::from_config(&config, credentials)
//!     .interceptor(ForcedLogout::new(session.clone()))
//!     .build()?;
//!
//! session.restore().await?;
//! session.login(&client, "a@b.com", "secret").await?;
//! let notes = client.fetch_notes().await?;
//! # let _ = notes;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod endpoints;
mod error;
pub mod interceptor;
pub mod models;
pub mod session;
pub mod validation;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use credentials::{Credential, CredentialStore, StoredCredential};
pub use endpoints::LoginResponse;
pub use error::ApiError;
pub use interceptor::{ForcedLogout, ResponseInterceptor};
pub use models::{Note, NoteDraft, ResourceId, UserRecord};
pub use session::{Session, SessionState};
pub use validation::{message_for, LoginForm, RegisterForm, ValidationError};
