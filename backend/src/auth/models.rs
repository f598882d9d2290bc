//! Data structures for authentication requests and results.
//!
//! This module defines the request payloads accepted by the auth operations,
//! the payloads returned on success, and `Outcome`, the uniform result every
//! operation produces.

use crate::database::models::{User, UserRole, UserStatus};
use crate::errors::{MessageCode, ServiceError};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// A single form field as submitted.
///
/// Strings stay strings; any other JSON value is kept as-is so that one
/// wrongly typed field does not invalidate the rest of the body. A
/// non-string value never equals a string one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FormValue {
    Text(String),
    Other(serde_json::Value),
}

impl FormValue {
    /// Mirrors JavaScript truthiness: `""`, `0`, and `false` count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            FormValue::Text(text) => !text.is_empty(),
            FormValue::Other(serde_json::Value::Bool(flag)) => *flag,
            FormValue::Other(serde_json::Value::Number(number)) => number.as_f64() != Some(0.0),
            FormValue::Other(serde_json::Value::Null) => false,
            FormValue::Other(_) => true,
        }
    }

    /// Textual form used for lookups and hashing.
    pub fn into_text(self) -> String {
        match self {
            FormValue::Text(text) => text,
            FormValue::Other(value) => value.to_string(),
        }
    }
}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        FormValue::Text(text.to_string())
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        FormValue::Text(text)
    }
}

impl<'de> Deserialize<'de> for FormValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(text) => FormValue::Text(text),
            other => FormValue::Other(other),
        })
    }
}

fn validate_present(value: &FormValue) -> Result<(), ValidationError> {
    if value.is_present() {
        Ok(())
    } else {
        Err(ValidationError::new("required"))
    }
}

/// Check-email request payload
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CheckEmailRequest {
    #[serde(default)]
    #[validate(required, custom(function = "validate_present"))]
    pub email: Option<FormValue>,
}

/// Registration request payload
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(required, custom(function = "validate_present"))]
    pub fullname: Option<FormValue>,

    #[serde(default)]
    #[validate(required, custom(function = "validate_present"))]
    pub email: Option<FormValue>,

    #[serde(default)]
    #[validate(required, custom(function = "validate_present"))]
    pub password: Option<FormValue>,

    #[serde(default)]
    pub retype_password: Option<FormValue>,
}

/// Login request payload
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(required, custom(function = "validate_present"))]
    pub email: Option<FormValue>,

    #[serde(default)]
    #[validate(required, custom(function = "validate_present"))]
    pub password: Option<FormValue>,
}

/// Token refresh request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    #[validate(required, custom(function = "validate_present"))]
    pub refresh_token: Option<FormValue>,
}

/// Access and refresh token returned by login and refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// User information returned after registration, without the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub fullname: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname,
            email: user.email,
            role: user.role,
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Registration success payload
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    #[serde(rename = "User")]
    pub user: UserInfo,
}

/// Result of every auth operation.
///
/// Serialises as `{"status": bool, "message": CODE, ...payload}`; the numeric
/// status code is carried alongside for the transport to render.
#[derive(Debug, Serialize)]
pub struct Outcome<T> {
    #[serde(rename = "status")]
    pub success: bool,
    pub message: MessageCode,
    #[serde(skip)]
    pub status_code: u16,
    #[serde(flatten)]
    pub payload: Option<T>,
}

impl<T> Outcome<T> {
    pub fn success(message: MessageCode, payload: Option<T>) -> Self {
        Self {
            success: true,
            message,
            status_code: 200,
            payload,
        }
    }

    pub fn failure(error: &ServiceError) -> Self {
        let (status_code, message) = error.classify();
        Self {
            success: false,
            message,
            status_code,
            payload: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Returns the code of the first field, in check order, that failed validation.
pub fn first_failed_check(
    errors: &ValidationErrors,
    checks: &[(&'static str, MessageCode)],
) -> Option<MessageCode> {
    checks
        .iter()
        .find(|(field, _)| errors.errors().contains_key(*field))
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_outcome_wire_format() {
        let outcome: Outcome<TokenPair> =
            Outcome::failure(&ServiceError::validation(MessageCode::PasswordMustMatch));

        assert_eq!(outcome.status_code, 428);
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({ "status": false, "message": "PASSWORD_MUST_MATCH" })
        );
    }

    #[test]
    fn test_token_pair_is_flattened() {
        let outcome = Outcome::success(
            MessageCode::LoginSuccess,
            Some(TokenPair {
                access_token: "a".to_string(),
                refresh_token: "r".to_string(),
            }),
        );

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({
                "status": true,
                "message": "LOGIN_SUCCESS",
                "accessToken": "a",
                "refreshToken": "r"
            })
        );
    }

    #[test]
    fn test_register_request_wire_names() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "fullname": "A",
            "email": "a@x.com",
            "password": "p1",
            "retype_password": "p2"
        }))
        .unwrap();
        assert_eq!(request.retype_password, Some("p2".into()));

        let refresh: RefreshTokenRequest =
            serde_json::from_value(serde_json::json!({ "refreshToken": "t" })).unwrap();
        assert_eq!(refresh.refresh_token, Some("t".into()));
    }

    #[test]
    fn test_first_failed_check_respects_order() {
        let request = RegisterRequest {
            fullname: None,
            email: Some("".into()),
            password: None,
            retype_password: None,
        };
        let errors = request.validate().unwrap_err();

        let checks = [
            ("fullname", MessageCode::FullnameIsRequired),
            ("email", MessageCode::EmailIsRequired),
            ("password", MessageCode::PasswordIsRequired),
        ];
        assert_eq!(
            first_failed_check(&errors, &checks),
            Some(MessageCode::FullnameIsRequired)
        );
        assert_eq!(
            first_failed_check(&errors, &checks[1..]),
            Some(MessageCode::EmailIsRequired)
        );
    }

    #[test]
    fn test_wrongly_typed_field_keeps_the_others() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "fullname": "A",
            "email": "a@x.com",
            "password": "p1",
            "retype_password": 123
        }))
        .unwrap();

        assert_eq!(request.fullname, Some("A".into()));
        assert_eq!(request.password, Some("p1".into()));
        assert_eq!(
            request.retype_password,
            Some(FormValue::Other(serde_json::json!(123)))
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_non_string_never_equals_string() {
        assert_ne!(
            FormValue::from("123"),
            FormValue::Other(serde_json::json!(123))
        );
        assert_eq!(FormValue::Other(serde_json::json!(42)).into_text(), "42");
    }

    #[test]
    fn test_presence_follows_truthiness() {
        assert!(FormValue::from("x").is_present());
        assert!(!FormValue::from("").is_present());
        assert!(FormValue::Other(serde_json::json!(7)).is_present());
        assert!(!FormValue::Other(serde_json::json!(0)).is_present());
        assert!(!FormValue::Other(serde_json::json!(false)).is_present());
        assert!(FormValue::Other(serde_json::json!(true)).is_present());
        assert!(FormValue::Other(serde_json::json!({})).is_present());
    }
}
