use api::ApiError;

/// A user action that can fail with an alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Login,
    Register,
    LoadNotes,
    LoadNote,
    CreateNote,
    UpdateNote,
    DeleteNote,
    ShareNote,
}

impl Action {
    /// Shown when the server gave no message.
    pub fn fallback(self) -> &'static str {
        match self {
            Action::Login => "Login failed. Please try again.",
            Action::Register => "Registration failed",
            Action::LoadNotes => "Failed to load notes",
            Action::LoadNote => "Failed to load note",
            Action::CreateNote => "Failed to create note",
            Action::UpdateNote => "Failed to update note",
            Action::DeleteNote => "Failed to delete note",
            Action::ShareNote => "Failed to share note",
        }
    }
}

/// Alert text for a failed action.
pub fn error_message(action: Action, err: &ApiError) -> String {
    err.user_message(action.fallback())
}
