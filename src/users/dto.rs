use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{AppError, FieldError};
use crate::users::repo::User;

pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn default_true() -> bool {
    true
}

/// Maps a present field (value or null) to `Some(inner)`; an absent field
/// stays `None` via `#[serde(default)]`. Distinguishes "clear this column"
/// from "leave it alone".
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// Request body for user creation. All fields required for insertion.
#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub password: String,
}

impl UserCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        check_username(&self.username, &mut errors);
        check_email(&self.email, &mut errors);
        if let Some(full_name) = &self.full_name {
            check_full_name(full_name, &mut errors);
        }
        check_password(&self.password, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Request body for user update. Absent fields leave the stored value
/// untouched; `full_name` is doubly wrapped so an explicit null clears the
/// column instead of being read as absent.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub full_name: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if let Some(username) = &self.username {
            check_username(username, &mut errors);
        }
        if let Some(email) = &self.email {
            check_email(email, &mut errors);
        }
        if let Some(Some(full_name)) = &self.full_name {
            check_full_name(full_name, &mut errors);
        }
        if let Some(password) = &self.password {
            check_password(password, &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.full_name.is_none()
            && self.is_active.is_none()
            && self.password.is_none()
    }

    /// Copies the supplied fields onto a fetched row. The password is not
    /// handled here; the handler hashes it before storage.
    pub fn apply(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(full_name) = &self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}

/// Public view of a user. Never carries the password or its hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn check_username(value: &str, errors: &mut Vec<FieldError>) {
    let len = value.chars().count();
    if !(3..=50).contains(&len) {
        errors.push(FieldError::new(
            "username",
            "must be between 3 and 50 characters",
        ));
    }
}

fn check_email(value: &str, errors: &mut Vec<FieldError>) {
    if !is_valid_email(value) {
        errors.push(FieldError::new("email", "must be a valid email address"));
    }
}

fn check_full_name(value: &str, errors: &mut Vec<FieldError>) {
    if value.chars().count() > 100 {
        errors.push(FieldError::new(
            "full_name",
            "must be at most 100 characters",
        ));
    }
}

fn check_password(value: &str, errors: &mut Vec<FieldError>) {
    if value.chars().count() < 8 {
        errors.push(FieldError::new(
            "password",
            "must be at least 8 characters",
        ));
    }
}
