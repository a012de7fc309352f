//! Authentication service
//!
//! Email/password accounts with bcrypt hashing and JWT session tokens.
//! Tokens are issued here and validated by the auth middleware; clients
//! hold them as bearer credentials rather than reading ambient storage.

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{validate_email, validate_password, User};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    token_expiry_seconds: i64,
}

/// Stored user row
#[derive(Debug, sqlx::FromRow)]
struct UserRecord {
    id: Uuid,
    email: String,
    full_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    fn into_domain(self) -> User {
        User {
            id: self.id,
            email: self.email,
            full_name: self.full_name,
            created_at: self.created_at,
        }
    }
}

/// Input for registration
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Input for login
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful authentication response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    exp: i64,
    iat: i64,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, jwt_secret: String, token_expiry_seconds: i64) -> Self {
        Self {
            db,
            jwt_secret,
            token_expiry_seconds,
        }
    }

    /// Register a new user account
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthResponse> {
        validate_email(&input.email).map_err(|e| AppError::Validation {
            field: "email".to_string(),
            message: e.to_string(),
        })?;
        validate_password(&input.password).map_err(|e| AppError::Validation {
            field: "password".to_string(),
            message: e.to_string(),
        })?;

        let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(&input.email)
            .fetch_optional(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }

        let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let record: UserRecord = sqlx::query_as(
            r#"
            INSERT INTO users (id, email, full_name, password_hash, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, email, full_name, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.email)
        .bind(&input.full_name)
        .bind(&password_hash)
        .fetch_one(&self.db)
        .await?;

        let token = self.issue_token(record.id, &record.email)?;
        Ok(AuthResponse {
            token,
            user: record.into_domain(),
        })
    }

    /// Log in with email and password
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthResponse> {
        let record: Option<UserRecord> = sqlx::query_as(
            r#"
            SELECT id, email, full_name, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(&input.email)
        .fetch_optional(&self.db)
        .await?;

        let record = record.ok_or(AppError::InvalidCredentials)?;

        let valid = bcrypt::verify(&input.password, &record.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issue_token(record.id, &record.email)?;
        Ok(AuthResponse {
            token,
            user: record.into_domain(),
        })
    }

    /// Fetch the current user's profile
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        let record: Option<UserRecord> = sqlx::query_as(
            r#"
            SELECT id, email, full_name, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        record
            .map(UserRecord::into_domain)
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    fn issue_token(&self, user_id: Uuid, email: &str) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + self.token_expiry_seconds,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }
}
