//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse request bodies, call `auth::service` and render the
//! returned `Outcome`. They make no business decisions of their own.

use crate::api::common::ApiResponse;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// An unreadable body is treated as one with every field missing.
fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!("Unreadable request body: {}", rejection);
            T::default()
        }
    }
}

/// Handle check-email request
#[axum::debug_handler]
pub async fn check_email(
    Extension(service): Extension<Arc<AuthService>>,
    payload: Result<Json<CheckEmailRequest>, JsonRejection>,
) -> Response {
    service
        .check_email(body_or_default(payload))
        .await
        .into_response()
}

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(service): Extension<Arc<AuthService>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    service.register(body_or_default(payload)).await.into_response()
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(service): Extension<Arc<AuthService>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    service.login(body_or_default(payload)).await.into_response()
}

/// Handle token refresh request
#[axum::debug_handler]
pub async fn refresh_token(
    Extension(service): Extension<Arc<AuthService>>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Response {
    service.refresh(body_or_default(payload)).await.into_response()
}

/// Return the claims of the presented access token
#[axum::debug_handler]
pub async fn me(Extension(claims): Extension<Claims>) -> Json<ApiResponse<Claims>> {
    Json(ApiResponse::success(claims, "Access token is valid"))
}
