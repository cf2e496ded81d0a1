//! # Resource endpoints
//!
//! Typed wrappers over [`ApiClient`], one HTTP call each. Nothing here
//! retries, batches, or caches, and `create_note` sends no idempotency key:
//! two calls create two notes. Note ids are percent-encoded into the path.
//!
//! | Method | Request |
//! |--------|---------|
//! | [`login`](ApiClient::login) | `POST /auth/login {email, password}` |
//! | [`register`](ApiClient::register) | `POST /auth/register {email, password}` |
//! | [`fetch_notes`](ApiClient::fetch_notes) | `GET /notes` |
//! | [`fetch_note`](ApiClient::fetch_note) | `GET /notes/:id` |
//! | [`create_note`](ApiClient::create_note) | `POST /notes {user_id, title, content}` |
//! | [`update_note`](ApiClient::update_note) | `PUT /notes/:id {title, content}` |
//! | [`delete_note`](ApiClient::delete_note) | `DELETE /notes/:id` |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Note, NoteDraft, ResourceId, UserRecord};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body of a successful `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserRecord,
}

#[derive(Serialize)]
struct CreateNote<'a> {
    user_id: &'a ResourceId,
    title: &'a str,
    content: &'a str,
}

impl<S: KeyValueStore> ApiClient<S> {
    /// Exchange email and password for a token. Does not touch the session;
    /// use [`Session::login`](crate::Session::login) to sign in.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.post(&["auth", "login"], &Credentials { email, password })
            .await
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        self.post(&["auth", "register"], &Credentials { email, password })
            .await
    }

    pub async fn fetch_notes(&self) -> Result<Vec<Note>, ApiError> {
        self.get(&["notes"]).await
    }

    pub async fn fetch_note(&self, id: &ResourceId) -> Result<Note, ApiError> {
        self.get(&["notes", &id.to_string()]).await
    }

    /// Create a note owned by the stored user. Fails before any I/O on a
    /// blank title, and before the request when no user is stored.
    pub async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        draft.validate()?;
        let user = self
            .credentials()
            .user()
            .await?
            .ok_or(ApiError::NotAuthenticated)?;

        self.post(
            &["notes"],
            &CreateNote {
                user_id: &user.id,
                title: &draft.title,
                content: &draft.content,
            },
        )
        .await
    }

    pub async fn update_note(&self, id: &ResourceId, draft: &NoteDraft) -> Result<Note, ApiError> {
        draft.validate()?;
        self.put(&["notes", &id.to_string()], draft).await
    }

    /// Returns whatever confirmation the server sends (`null` for an empty body).
    pub async fn delete_note(&self, id: &ResourceId) -> Result<Value, ApiError> {
        self.delete(&["notes", &id.to_string()]).await
    }
}
