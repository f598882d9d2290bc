//! Authentication module for registering users, verifying credentials and
//! issuing session tokens.
//!
//! This module provides the public interface for check-email, registration,
//! login, token refresh and the bearer-token middleware.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
