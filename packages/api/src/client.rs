//! # Authorized request client
//!
//! [`ApiClient`] wraps a [`reqwest::Client`] and is the only path by which
//! the app talks to the notes API. For every request it:
//!
//! 1. reads the token from the [`CredentialStore`] (not the in-memory
//!    session, so requests made before `restore()` finishes are still
//!    authorized) and attaches it as `Authorization: Bearer <token>`;
//! 2. sends the request once, with no retry;
//! 3. runs every registered [`ResponseInterceptor`] exactly once with the
//!    response status, as soon as the status line arrives and before the
//!    body is read;
//! 4. returns the decoded body, or the failure as an [`ApiError`]. A 401
//!    surfaces as [`ApiError::AuthExpired`] after the interceptors ran.
//!
//! Request paths are given as segments below the base URL; each segment is
//! percent-encoded, so an id containing `/` or `?` stays one segment.
//!
//! Clients are assembled with [`ApiClient::builder`] or
//! [`ApiClient::from_config`]; interceptors can only be added there.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::KeyValueStore;

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::error::ApiError;
use crate::interceptor::ResponseInterceptor;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client that authorizes requests from the stored credential.
#[derive(Clone)]
pub struct ApiClient<S> {
    http: reqwest::Client,
    base_url: Url,
    credentials: CredentialStore<S>,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

/// Collects settings and interceptors before building an [`ApiClient`].
pub struct ApiClientBuilder<S> {
    base_url: String,
    timeout: Duration,
    credentials: CredentialStore<S>,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl<S: KeyValueStore> ApiClientBuilder<S> {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Register a response interceptor. Interceptors run in registration order.
    pub fn interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn build(self) -> Result<ApiClient<S>, ApiError> {
        let base_url = Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::BaseUrl(format!("{}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(self.base_url));
        }
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(ApiClient {
            http,
            base_url,
            credentials: self.credentials,
            interceptors: self.interceptors,
        })
    }
}

impl<S: KeyValueStore> ApiClient<S> {
    pub fn builder(base_url: impl Into<String>, credentials: CredentialStore<S>) -> ApiClientBuilder<S> {
        ApiClientBuilder {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            credentials,
            interceptors: Vec::new(),
        }
    }

    /// Builder preloaded with the configured base URL and timeout.
    pub fn from_config(config: &ClientConfig, credentials: CredentialStore<S>) -> ApiClientBuilder<S> {
        Self::builder(config.api.base_url.clone(), credentials).timeout(config.timeout())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn credentials(&self) -> &CredentialStore<S> {
        &self.credentials
    }

    /// Base URL with `segments` appended, each one percent-encoded. Empty
    /// and dot segments are rejected since they would address another
    /// resource.
    pub fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ApiError::PathSegment((*segment).to_string()));
        }
        let mut url = self.base_url.clone();
        // `build` rejected cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.url(segments)?;
        self.execute(Method::GET, self.http.get(url.clone()), &url).await
    }

    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(segments)?;
        self.execute(Method::POST, self.http.post(url.clone()).json(body), &url)
            .await
    }

    pub async fn put<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(segments)?;
        self.execute(Method::PUT, self.http.put(url.clone()).json(body), &url)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.url(segments)?;
        self.execute(Method::DELETE, self.http.delete(url.clone()), &url)
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, ApiError> {
        let request = match self.credentials.token().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let path = url.path();
        tracing::debug!(%method, path, "sending request");
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "received response");

        for interceptor in &self.interceptors {
            interceptor.on_response(status).await;
        }

        let body = match response.text().await {
            Ok(body) => body,
            // The status alone decides a failure; its body only adds the message.
            Err(e) if !status.is_success() => {
                tracing::debug!(%method, path, error = %e, "error body unreadable");
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        if !status.is_success() {
            return Err(ApiError::from_response(status, &body));
        }
        decode_body(&body)
    }
}

/// Decode a success body. An empty body decodes as JSON `null`.
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(ApiError::Decode)
}
