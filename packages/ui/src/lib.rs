//! This crate contains the UI-side glue shared by the app's screens: the
//! injected session context, note colors, and alert messages.

pub mod alerts;
pub use alerts::{error_message, Action};

mod auth;
pub use auth::{use_app, use_auth, AppClient, AppContext, AppSession, AuthProvider, AuthState, RootView};

pub mod colors;
pub use colors::{color_for, note_colors, random_color, NoteColorMap, NoteColors, NOTE_COLORS};

// Re-export the form types screens validate against.
pub use api::{message_for, LoginForm, NoteDraft, RegisterForm, ValidationError};
