use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;

const USERNAME_MAX_CHARS: usize = 150;
const PASSWORD_MAX_CHARS: usize = 128;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) password: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ValidRegistration {
    pub(crate) username: String,
    pub(crate) email: Option<String>,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<ValidRegistration, DomainError> {
        let username = normalize_register_username(self.username.as_deref().unwrap_or_default())?;
        let password = self.password.unwrap_or_default();
        if password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "username and password required",
            });
        }
        if password.chars().count() > PASSWORD_MAX_CHARS {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be at most 128 chars",
            });
        }
        let email = match self.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => Some(normalize_email(email)?),
            _ => None,
        };

        Ok(ValidRegistration {
            username,
            email,
            password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.chars().count() > USERNAME_MAX_CHARS {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..150 chars",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        email: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let username = normalize_register_username(&username.into())?;

        Ok(Self {
            id,
            username,
            email,
            created_at,
        })
    }
}

fn normalize_register_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(DomainError::Validation {
            field: "username",
            message: "username and password required",
        });
    }
    if username.chars().count() > USERNAME_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be at most 150 chars",
        });
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}
