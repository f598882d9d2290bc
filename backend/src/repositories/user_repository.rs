//! Database repository for user credentials.
//!
//! The credential store only knows how to look a user up by email and how to
//! insert a new one. Email uniqueness is not enforced here; callers perform an
//! advisory check before inserting.

use crate::database::models::{CreateUser, User};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Persistence boundary used by the authentication service.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns the first user registered with `email`, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Persists a new user. `Ok(None)` means the store accepted the call but
    /// produced no record.
    async fn create_user(&self, user: CreateUser) -> Result<Option<User>>;
}

/// Repository for user database operations backed by SQLite.
#[derive(Clone)]
pub struct SqliteUserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Creates a new SqliteUserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password_hash, role, status, created_at, updated_at
            FROM users
            WHERE email = ?
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: CreateUser) -> Result<Option<User>> {
        let id = Uuid::now_v7().to_string();
        let now = Utc::now().timestamp();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, fullname, email, password_hash, role, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, fullname, email, password_hash, role, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user.fullname)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role)
        .bind(user.status)
        .bind(now)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
