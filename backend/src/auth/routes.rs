//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle check-email, registration, login and token refresh.
//! They are designed to be nested into the main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use crate::auth::service::AuthService;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

/// Creates the authentication router with all auth-related routes
pub fn auth_router(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/check-email", post(check_email))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route(
            "/me",
            get(me).layer(middleware::from_fn_with_state(service, jwt_auth)),
        )
}
