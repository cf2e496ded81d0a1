//! Data models exchanged with the notes API.

mod id;
mod note;
mod user;

pub use id::ResourceId;
pub use note::{Note, NoteDraft};
pub use user::UserRecord;
