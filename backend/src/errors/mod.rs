//! Global application error types and handlers.
//!
//! This module defines the machine-readable message codes returned to
//! clients and the service error taxonomy, together with the single mapping
//! from an error kind to its status code and message.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Machine-readable result code carried by every outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageCode {
    EmailExist,
    EmailNotExist,
    FullnameIsRequired,
    EmailIsRequired,
    PasswordIsRequired,
    PasswordMustMatch,
    UserRegisterFailed,
    UserRegisterSuccess,
    UserNotFound,
    PasswordWrong,
    LoginSuccess,
    RefreshTokenIsRequired,
    RefreshTokenInvalid,
    RefreshTokenSuccess,
    InternalServerError,
}

impl MessageCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageCode::EmailExist => "EMAIL_EXIST",
            MessageCode::EmailNotExist => "EMAIL_NOT_EXIST",
            MessageCode::FullnameIsRequired => "FULLNAME_IS_REQUIRED",
            MessageCode::EmailIsRequired => "EMAIL_IS_REQUIRED",
            MessageCode::PasswordIsRequired => "PASSWORD_IS_REQUIRED",
            MessageCode::PasswordMustMatch => "PASSWORD_MUST_MATCH",
            MessageCode::UserRegisterFailed => "USER_REGISTER_FAILED",
            MessageCode::UserRegisterSuccess => "USER_REGISTER_SUCCESS",
            MessageCode::UserNotFound => "USER_NOT_FOUND",
            MessageCode::PasswordWrong => "PASSWORD_WRONG",
            MessageCode::LoginSuccess => "LOGIN_SUCCESS",
            MessageCode::RefreshTokenIsRequired => "REFRESH_TOKEN_IS_REQUIRED",
            MessageCode::RefreshTokenInvalid => "REFRESH_TOKEN_INVALID",
            MessageCode::RefreshTokenSuccess => "REFRESH_TOKEN_SUCCESS",
            MessageCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure kinds produced by the authentication core.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or mismatched input, or a failed registration precondition.
    #[error("Validation error: {code}")]
    Validation { code: MessageCode },

    #[error("Already exists: {code}")]
    AlreadyExists { code: MessageCode },

    #[error("Not found: {code}")]
    NotFound { code: MessageCode },

    #[error("Invalid credentials: {code}")]
    InvalidCredentials { code: MessageCode },

    #[error("Invalid token: {code}")]
    InvalidToken { code: MessageCode },

    #[error("Internal error ({code}): {message}")]
    Internal { code: MessageCode, message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(code: MessageCode) -> Self {
        Self::Validation { code }
    }

    pub fn already_exists(code: MessageCode) -> Self {
        Self::AlreadyExists { code }
    }

    pub fn not_found(code: MessageCode) -> Self {
        Self::NotFound { code }
    }

    pub fn invalid_credentials(code: MessageCode) -> Self {
        Self::InvalidCredentials { code }
    }

    pub fn invalid_token(code: MessageCode) -> Self {
        Self::InvalidToken { code }
    }

    pub fn internal(code: MessageCode, message: impl Into<String>) -> Self {
        Self::Internal {
            code,
            message: message.into(),
        }
    }

    /// Unclassified fault; renders as `INTERNAL_SERVER_ERROR`.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(MessageCode::InternalServerError, message)
    }

    /// Maps an error kind to the status code and message code clients see.
    pub fn classify(&self) -> (u16, MessageCode) {
        match self {
            ServiceError::Validation { code } => (428, *code),
            ServiceError::AlreadyExists { code } => (409, *code),
            ServiceError::NotFound { code } => (404, *code),
            ServiceError::InvalidCredentials { code } => (428, *code),
            ServiceError::InvalidToken { code } => (401, *code),
            ServiceError::Internal { code, .. } => (500, *code),
            ServiceError::Database { .. } => (500, MessageCode::InternalServerError),
        }
    }
}
