//! # Response interceptors
//!
//! An [`ResponseInterceptor`] observes the status of every response the
//! [`crate::ApiClient`] receives. Interceptors are registered once, when the
//! client is built, and each one runs exactly once per response, before the
//! caller sees the result. They cannot alter or swallow the outcome.
//!
//! [`ForcedLogout`] is the only interceptor the app registers: on a 401 it
//! tears the session down. Screens never trigger logout on auth failures
//! themselves.

use async_trait::async_trait;
use reqwest::StatusCode;
use store::KeyValueStore;

use crate::session::Session;

/// Hook run after every HTTP response.
#[async_trait(?Send)]
pub trait ResponseInterceptor {
    async fn on_response(&self, status: StatusCode);
}

/// Signs the session out whenever the server rejects the token.
pub struct ForcedLogout<S> {
    session: Session<S>,
}

impl<S: KeyValueStore> ForcedLogout<S> {
    pub fn new(session: Session<S>) -> Self {
        Self { session }
    }
}

#[async_trait(?Send)]
impl<S: KeyValueStore> ResponseInterceptor for ForcedLogout<S> {
    async fn on_response(&self, status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED {
            return;
        }
        tracing::warn!("token rejected by server, signing out");
        if let Err(e) = self.session.logout().await {
            tracing::error!(error = %e, "forced logout could not clear stored credential");
        }
    }
}
