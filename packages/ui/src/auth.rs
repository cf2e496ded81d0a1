//! Authentication context and hooks for the UI.

use std::rc::Rc;

use api::{ApiClient, ApiError, ClientConfig, CredentialStore, ForcedLogout, Session, SessionState, UserRecord};
use dioxus::prelude::*;
use store::FileStore;

pub type AppSession = Session<FileStore>;
pub type AppClient = ApiClient<FileStore>;

/// The session and the authorized client, built once at startup and
/// injected into the component tree by [`AuthProvider`].
#[derive(Clone)]
pub struct AppContext {
    pub session: AppSession,
    pub client: Rc<AppClient>,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session && Rc::ptr_eq(&self.client, &other.client)
    }
}

impl AppContext {
    /// Wire the app against the configured storage namespace.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_store(config, FileStore::for_namespace(&config.storage.namespace))
    }

    /// Wire the app against an explicit store. The client gets the one
    /// forced-logout interceptor for the session.
    pub fn with_store(config: &ClientConfig, kv: FileStore) -> Result<Self, ApiError> {
        let credentials = CredentialStore::new(kv);
        let session = Session::new(credentials.clone());
        let client = ApiClient::from_config(config, credentials)
            .interceptor(ForcedLogout::new(session.clone()))
            .build()?;
        Ok(Self {
            session,
            client: Rc::new(client),
        })
    }
}

/// Which navigator the root renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootView {
    /// Stored credential not read yet.
    Loading,
    /// Login and register screens.
    SignedOut,
    /// Notes, note detail and profile screens.
    SignedIn,
}

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<UserRecord>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
        }
    }
}

impl From<&SessionState> for AuthState {
    fn from(state: &SessionState) -> Self {
        Self {
            token: state.token.clone(),
            user: state.user.clone(),
            loading: state.is_loading,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn root_view(&self) -> RootView {
        if self.loading {
            RootView::Loading
        } else if self.is_authenticated() {
            RootView::SignedIn
        } else {
            RootView::SignedOut
        }
    }

    /// Name shown on the profile screen.
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map_or("Guest", UserRecord::display_name)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Get the injected session and client.
pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

/// Provider component that restores the session and mirrors its changes.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(app: AppContext, children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);
    let session = app.session.clone();

    use_context_provider(|| app.clone());

    // Restore once on mount, then follow every session change (login,
    // logout, forced logout on 401).
    use_future(move || {
        let session = session.clone();
        async move {
            if let Err(e) = session.restore().await {
                tracing::error!("Failed to restore session: {}", e);
            }
            let mut changes = session.subscribe();
            loop {
                let next = AuthState::from(&*changes.borrow_and_update());
                if *auth_state.peek() != next {
                    auth_state.set(next);
                }
                if changes.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> AuthState {
        AuthState {
            token: Some("tok1".to_string()),
            user: Some(UserRecord::new(1, "a@b.com")),
            loading: false,
        }
    }

    #[test]
    fn test_root_view() {
        assert_eq!(AuthState::default().root_view(), RootView::Loading);
        assert_eq!(signed_in().root_view(), RootView::SignedIn);

        let signed_out = AuthState {
            loading: false,
            ..AuthState::default()
        };
        assert_eq!(signed_out.root_view(), RootView::SignedOut);
        assert_eq!(signed_out.display_name(), "Guest");
        assert_eq!(signed_in().display_name(), "a@b.com");
    }

    #[tokio::test]
    async fn test_context_wires_forced_logout_to_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::new("http://127.0.0.1:9/api");
        let app = AppContext::with_store(&config, FileStore::new(dir.path().to_path_buf())).unwrap();

        assert_eq!(app.client.base_url(), "http://127.0.0.1:9/api");
        assert!(app.clone() == app);

        app.session
            .credentials()
            .set("tok1", &UserRecord::new(1, "a@b.com"))
            .await
            .unwrap();
        app.session.restore().await.unwrap();

        let state = AuthState::from(&app.session.state());
        assert_eq!(state.root_view(), RootView::SignedIn);
        // Client and session share the same stored credential.
        assert_eq!(
            app.client.credentials().token().await.unwrap().as_deref(),
            Some("tok1")
        );
    }
}
