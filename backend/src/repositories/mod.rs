//! Persistence layer for the credential store.

pub mod user_repository;
