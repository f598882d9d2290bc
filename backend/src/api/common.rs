//! Response rendering shared by all endpoints.
//!
//! Auth operations return an `Outcome`, which is rendered here as JSON with
//! its own status code. Other endpoints use the `ApiResponse` envelope.

use crate::auth::models::Outcome;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for non-auth endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Request timestamp
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{MessageCode, ServiceError};

    #[test]
    fn test_outcome_status_is_rendered() {
        let outcome: Outcome<()> =
            Outcome::failure(&ServiceError::already_exists(MessageCode::EmailExist));
        assert_eq!(outcome.into_response().status(), StatusCode::CONFLICT);

        let outcome: Outcome<()> = Outcome::success(MessageCode::EmailNotExist, None);
        assert_eq!(outcome.into_response().status(), StatusCode::OK);
    }

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(7, "ok");
        assert!(response.success);
        assert_eq!(response.data, Some(7));
        assert_eq!(response.message, "ok");
    }
}
