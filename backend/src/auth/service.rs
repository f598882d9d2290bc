//! Core business logic for the authentication system.
//!
//! Each operation is an ordered pipeline of checks that stops at the first
//! failure. The order decides which code a caller sees, so it is part of the
//! contract. Every operation returns exactly one `Outcome`; faults from the
//! store, the hasher or the token issuer are classified and never escape.

use crate::auth::models::*;
use crate::database::models::{CreateUser, UserRole, UserStatus};
use crate::errors::{MessageCode, ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::{TokenError, TokenIdentity, TokenIssuer};
use crate::utils::password::PasswordHasher;
use std::sync::Arc;
use validator::Validate;

/// Authentication service for check-email, registration, login and refresh
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
    hasher: PasswordHasher,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenIssuer, hasher: PasswordHasher) -> Self {
        AuthService {
            users,
            tokens,
            hasher,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Report whether an email is still free to register
    pub async fn check_email(&self, request: CheckEmailRequest) -> Outcome<()> {
        match self.try_check_email(request).await {
            Ok(()) => Outcome::success(MessageCode::EmailNotExist, None),
            Err(error) => self.fail("check_email", error),
        }
    }

    /// Create a cashier account after validating the submitted form
    pub async fn register(&self, request: RegisterRequest) -> Outcome<RegisterPayload> {
        match self.try_register(request).await {
            Ok(payload) => {
                tracing::info!("Registered user {}", payload.user.id);
                Outcome::success(MessageCode::UserRegisterSuccess, Some(payload))
            }
            Err(error) => self.fail("register", error),
        }
    }

    /// Authenticate user and issue an access/refresh token pair
    pub async fn login(&self, request: LoginRequest) -> Outcome<TokenPair> {
        match self.try_login(request).await {
            Ok(tokens) => Outcome::success(MessageCode::LoginSuccess, Some(tokens)),
            Err(error) => self.fail("login", error),
        }
    }

    /// Exchange a valid refresh token for a fresh token pair
    pub async fn refresh(&self, request: RefreshTokenRequest) -> Outcome<TokenPair> {
        match self.try_refresh(request).await {
            Ok(tokens) => Outcome::success(MessageCode::RefreshTokenSuccess, Some(tokens)),
            Err(error) => self.fail("refresh", error),
        }
    }

    async fn try_check_email(&self, request: CheckEmailRequest) -> ServiceResult<()> {
        if request.validate().is_err() {
            return Err(ServiceError::validation(MessageCode::EmailIsRequired));
        }
        let email = request.email.map(FormValue::into_text).unwrap_or_default();

        if self.email_exists(&email).await? {
            return Err(ServiceError::already_exists(MessageCode::EmailExist));
        }
        Ok(())
    }

    async fn try_register(&self, request: RegisterRequest) -> ServiceResult<RegisterPayload> {
        if let Err(validation_errors) = request.validate() {
            let code = first_failed_check(
                &validation_errors,
                &[
                    ("fullname", MessageCode::FullnameIsRequired),
                    ("email", MessageCode::EmailIsRequired),
                    ("password", MessageCode::PasswordIsRequired),
                ],
            )
            .unwrap_or(MessageCode::FullnameIsRequired);
            return Err(ServiceError::validation(code));
        }

        if request.password != request.retype_password {
            return Err(ServiceError::validation(MessageCode::PasswordMustMatch));
        }

        let (Some(fullname), Some(email), Some(password)) =
            (request.fullname, request.email, request.password)
        else {
            return Err(ServiceError::internal_error("validated fields went missing"));
        };
        let (fullname, email, password) =
            (fullname.into_text(), email.into_text(), password.into_text());

        // Advisory only: a concurrent registration can still slip in
        // between this lookup and the insert below.
        if self.email_exists(&email).await? {
            return Err(ServiceError::validation(MessageCode::EmailExist));
        }

        let password_hash = self.hash_password(password).await?;

        let user = self
            .users
            .create_user(CreateUser {
                fullname,
                email,
                password_hash,
                role: UserRole::default(),
                status: UserStatus::default(),
            })
            .await?
            .ok_or_else(|| {
                ServiceError::internal(MessageCode::UserRegisterFailed, "store returned no record")
            })?;

        Ok(RegisterPayload { user: user.into() })
    }

    async fn try_login(&self, request: LoginRequest) -> ServiceResult<TokenPair> {
        if let Err(validation_errors) = request.validate() {
            let code = first_failed_check(
                &validation_errors,
                &[
                    ("email", MessageCode::EmailIsRequired),
                    ("password", MessageCode::PasswordIsRequired),
                ],
            )
            .unwrap_or(MessageCode::EmailIsRequired);
            return Err(ServiceError::validation(code));
        }

        let (Some(email), Some(password)) = (request.email, request.password) else {
            return Err(ServiceError::internal_error("validated fields went missing"));
        };
        let (email, password) = (email.into_text(), password.into_text());

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::not_found(MessageCode::UserNotFound))?;

        if !self.verify_password(password, user.password_hash.clone()).await? {
            tracing::warn!("Rejected password for user {}", user.id);
            return Err(ServiceError::invalid_credentials(MessageCode::PasswordWrong));
        }

        let tokens = self.issue_pair(&TokenIdentity {
            user_id: user.id.clone(),
            role: user.role,
        })?;

        tracing::info!("User {} logged in", user.id);
        Ok(tokens)
    }

    async fn try_refresh(&self, request: RefreshTokenRequest) -> ServiceResult<TokenPair> {
        if request.validate().is_err() {
            return Err(ServiceError::validation(MessageCode::RefreshTokenIsRequired));
        }
        let token = request
            .refresh_token
            .map(FormValue::into_text)
            .unwrap_or_default();

        let claims = self.tokens.verify_refresh(&token).map_err(|e| match e {
            TokenError::Invalid => {
                tracing::warn!("Rejected refresh token");
                ServiceError::invalid_token(MessageCode::RefreshTokenInvalid)
            }
            TokenError::Encoding(message) => ServiceError::internal_error(message),
        })?;

        // Rotation only: the presented refresh token stays valid until it expires.
        let tokens = self.issue_pair(&claims.identity())?;

        tracing::info!("Refreshed tokens for user {}", claims.user_id());
        Ok(tokens)
    }

    async fn email_exists(&self, email: &str) -> ServiceResult<bool> {
        Ok(self.users.find_by_email(email).await?.is_some())
    }

    async fn hash_password(&self, password: String) -> ServiceResult<String> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ServiceError::internal_error(format!("hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, digest: String) -> ServiceResult<bool> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| ServiceError::internal_error(format!("verification task failed: {}", e)))
    }

    fn issue_pair(&self, identity: &TokenIdentity) -> ServiceResult<TokenPair> {
        let access_token = self
            .tokens
            .issue_access(identity)
            .map_err(|e| ServiceError::internal_error(e.to_string()))?;
        let refresh_token = self
            .tokens
            .issue_refresh(identity)
            .map_err(|e| ServiceError::internal_error(e.to_string()))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn fail<T>(&self, operation: &str, error: ServiceError) -> Outcome<T> {
        let outcome = Outcome::failure(&error);
        if outcome.status_code >= 500 {
            tracing::error!("{} failed: {}", operation, error);
        } else {
            tracing::debug!("{} rejected with {}", operation, outcome.message);
        }
        outcome
    }
}
