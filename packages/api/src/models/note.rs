//! # Notes
//!
//! [`Note`] is the API's representation of a note; the client holds notes
//! only for as long as a screen keeps its list. [`NoteDraft`] is the
//! `{title, content}` payload shared by create and update.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ResourceId;
use crate::validation::{self, ValidationError};

/// A note as returned by `/notes` and `/notes/:id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Note {
    /// Text used by the copy and share actions.
    pub fn share_text(&self) -> String {
        format!("Title: {}\n\n{}", self.title, self.content)
    }

    /// `created_at` as `dd/mm/yyyy, h:mmAM`, in the offset the server sent.
    pub fn created_display(&self) -> String {
        self.created_at
            .as_deref()
            .and_then(format_timestamp)
            .unwrap_or_else(|| "No date available".to_string())
    }
}

fn format_timestamp(raw: &str) -> Option<String> {
    const DISPLAY: &str = "%d/%m/%Y, %-I:%M%p";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format(DISPLAY).to_string());
    }
    // Some backends drop the offset entirely.
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format(DISPLAY).to_string())
}

/// Title and content of a note being created or edited.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Draft for editing an existing note.
    pub fn from_note(note: &Note) -> Self {
        Self::new(note.title.clone(), note.content.clone())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_note_title(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(created_at: Option<&str>) -> Note {
        Note {
            id: ResourceId::Int(1),
            title: "Groceries".to_string(),
            content: "milk".to_string(),
            user_id: None,
            created_at: created_at.map(str::to_string),
        }
    }

    #[test]
    fn test_share_text() {
        assert_eq!(note(None).share_text(), "Title: Groceries\n\nmilk");
    }

    #[test]
    fn test_created_display() {
        assert_eq!(
            note(Some("2024-03-05T14:07:00.000Z")).created_display(),
            "05/03/2024, 2:07PM"
        );
        assert_eq!(
            note(Some("2024-12-31T00:30:00+02:00")).created_display(),
            "31/12/2024, 12:30AM"
        );
        assert_eq!(
            note(Some("2024-01-09 09:05:00")).created_display(),
            "09/01/2024, 9:05AM"
        );
        assert_eq!(note(None).created_display(), "No date available");
        assert_eq!(note(Some("yesterday")).created_display(), "No date available");
    }

    #[test]
    fn test_note_without_content_or_date() {
        let note: Note = serde_json::from_str(r#"{"id": "n1", "title": "t"}"#).unwrap();
        assert_eq!(note.content, "");
        assert!(note.created_at.is_none());
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = NoteDraft::new("   ", "x").validate().unwrap_err();
        assert_eq!(err.message, "Title is required");
        assert!(NoteDraft::new("t", "").validate().is_ok());
    }
}
