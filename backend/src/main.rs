//! Main entry point for the cashier authentication backend.
//!
//! This file initializes tracing, loads configuration, opens the database,
//! builds the auth service and serves the Axum router.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod utils;

use crate::api::common::ApiResponse;
use crate::auth::service::AuthService;
use crate::repositories::user_repository::SqliteUserRepository;
use crate::utils::jwt::TokenIssuer;
use crate::utils::password::PasswordHasher;
use anyhow::Result;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    db.migrate().await?;

    let users = Arc::new(SqliteUserRepository::new(db.pool().clone()));
    let tokens = TokenIssuer::new(&config.tokens)?;
    let hasher = PasswordHasher::new(config.bcrypt_cost)?;
    let service = Arc::new(AuthService::new(users, tokens, hasher));

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/auth", auth::routes::auth_router(service.clone()))
        .layer(Extension(service));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting auth server on port {}", config.server_port);
    axum::serve(listener, app).await?;

    db.close().await;
    Ok(())
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Cashier Auth Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the auth API",
    ))
}
