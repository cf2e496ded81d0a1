//! # Form validation
//!
//! Client-side checks run before any request is issued. A failed check is a
//! [`ValidationError`] naming the offending field and the message shown under
//! it; it never reaches the network.
//!
//! | Form | Checks |
//! |------|--------|
//! | [`LoginForm`] | email present and well-formed, password present |
//! | [`RegisterForm`] | as login, plus password length ≥ 6 and matching confirmation |
//! | [`crate::NoteDraft`] | title not blank |
//!
//! The login and register forms are checked with `validator` and report
//! every failing field at once, one message per field, in form order. An
//! empty field only reports that it is required.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Code of the `length(min = 1)` check every form field carries.
const REQUIRED: &str = "length";

/// A form field failed a client-side check.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: Cow<'static, str>,
}

impl ValidationError {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            message: Cow::Borrowed(message),
        }
    }
}

/// Message to show under `field`, if it failed.
pub fn message_for<'a>(errors: &'a [ValidationError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_ref())
}

/// Email/password pair entered on the login screen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginForm {
    const FIELDS: [&'static str; 2] = ["email", "password"];

    /// Every failing field, or `Ok` when the form can be submitted.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validate::validate(self).map_err(|errors| per_field(&errors, &Self::FIELDS))
    }
}

/// Fields of the registration screen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        custom(function = "password_long_enough")
    )]
    pub password: String,

    #[validate(
        length(min = 1, message = "Confirm password is required"),
        must_match(other = "password", message = "Passwords must match")
    )]
    pub confirm_password: String,
}

impl RegisterForm {
    const FIELDS: [&'static str; 3] = ["email", "password", "confirm_password"];

    /// Every failing field, or `Ok` when the form can be submitted.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validate::validate(self).map_err(|errors| per_field(&errors, &Self::FIELDS))
    }
}

fn password_long_enough(password: &str) -> Result<(), validator::ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(validator::ValidationError::new("min_password_length")
            .with_message(Cow::Borrowed("Password must be at least 6 characters")));
    }
    Ok(())
}

/// Flatten `validator`'s map into one error per field, ordered as `fields`.
/// An empty field fails several checks at once; only "required" is kept.
fn per_field(errors: &validator::ValidationErrors, fields: &[&'static str]) -> Vec<ValidationError> {
    let by_field = errors.field_errors();
    fields
        .iter()
        .filter_map(|&field| {
            let (_, failed) = by_field.iter().find(|(name, _)| {
                let name: &str = name;
                name == field
            })?;
            let first = failed
                .iter()
                .find(|e| e.code == REQUIRED)
                .or_else(|| failed.first())?;
            let message = first
                .message
                .clone()
                .unwrap_or(Cow::Borrowed("Invalid value"));
            Some(ValidationError { field, message })
        })
        .collect()
}

pub(crate) fn validate_note_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title", "Title is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn register(email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    fn messages(errors: &[ValidationError]) -> Vec<(&'static str, &str)> {
        errors.iter().map(|e| (e.field, e.message.as_ref())).collect()
    }

    #[test]
    fn test_login_form() {
        assert!(login("a@b.com", "secret").validate().is_ok());

        let errors = login("not-an-email", "x").validate().unwrap_err();
        assert_eq!(messages(&errors), [("email", "Invalid email address")]);

        let errors = login("a@b.com", "").validate().unwrap_err();
        assert_eq!(messages(&errors), [("password", "Password is required")]);
    }

    #[test]
    fn test_empty_login_form_reports_every_field() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(
            messages(&errors),
            [
                ("email", "Email is required"),
                ("password", "Password is required")
            ]
        );
        assert_eq!(message_for(&errors, "password"), Some("Password is required"));
        assert_eq!(message_for(&errors, "confirm_password"), None);
    }

    #[test]
    fn test_register_form() {
        assert!(register("a@b.com", "secret", "secret").validate().is_ok());

        let errors = register("nope", "12345", "12345").validate().unwrap_err();
        assert_eq!(
            messages(&errors),
            [
                ("email", "Invalid email"),
                ("password", "Password must be at least 6 characters")
            ]
        );

        let errors = register("a@b.com", "secret", "").validate().unwrap_err();
        assert_eq!(messages(&errors), [("confirm_password", "Confirm password is required")]);

        let errors = register("a@b.com", "secret", "secreT").validate().unwrap_err();
        assert_eq!(messages(&errors), [("confirm_password", "Passwords must match")]);
    }

    #[test]
    fn test_empty_register_form_reports_every_field() {
        let errors = RegisterForm::default().validate().unwrap_err();
        assert_eq!(
            messages(&errors),
            [
                ("email", "Email is required"),
                ("password", "Password is required"),
                ("confirm_password", "Confirm password is required")
            ]
        );
    }
}
