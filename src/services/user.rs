//! User service for database operations.
//!
//! Provides user lookups, account creation with hashed credentials, login
//! token management, and soft/hard deletion. Lookups used for
//! authentication exclude soft-deleted rows.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::user::{Role, User, UserStatus};
use crate::services::token::{generate_login_token, hash_password};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, status, role, login_token, created_at, deleted";

/// Finds a user by their internal UUID. Soft-deleted users are not returned.
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = ? AND deleted = 0",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Finds a user by email. Soft-deleted users are not returned.
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = ? AND deleted = 0",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Resolves a login token to its user.
///
/// Blocked users are still returned so the caller can distinguish a blocked
/// account from an unknown token; soft-deleted users are not.
pub async fn find_by_login_token(pool: &SqlitePool, token: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE login_token = ? AND deleted = 0",
        USER_COLUMNS
    ))
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Checks if an email is available for registration.
pub async fn email_is_available(pool: &SqlitePool, email: &str) -> AppResult<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_none())
}

/// Creates a user with a hashed password. Returns the stored user.
///
/// An already-registered email yields `AppError::Conflict`.
pub async fn create_user(
    pool: &SqlitePool,
    name: Option<&str>,
    email: &str,
    password: &str,
    role: Role,
    status: UserStatus,
) -> AppResult<User> {
    if !email_is_available(pool, email).await? {
        return Err(AppError::Conflict(format!(
            "email {} is already registered",
            email
        )));
    }

    let password_hash = hash_password(password)?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (id, name, email, password_hash, status, role, created_at, deleted) \
         VALUES (?, ?, ?, ?, ?, ?, ?, 0) \
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(status)
    .bind(role)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Creates an active user with the admin role.
pub async fn create_admin_user(
    pool: &SqlitePool,
    name: Option<&str>,
    email: &str,
    password: &str,
) -> AppResult<User> {
    create_user(pool, name, email, password, Role::Admin, UserStatus::Active).await
}

/// Issues a fresh login token for the user and persists it.
pub async fn issue_login_token(pool: &SqlitePool, user_id: Uuid) -> AppResult<String> {
    let token = generate_login_token();

    let result = sqlx::query("UPDATE users SET login_token = ? WHERE id = ? AND deleted = 0")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("user not found".to_string()));
    }

    Ok(token)
}

/// Clears the user's login token, ending their session.
pub async fn revoke_login_token(pool: &SqlitePool, user_id: Uuid) -> AppResult<()> {
    sqlx::query("UPDATE users SET login_token = NULL WHERE id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Deletes a user.
///
/// Soft delete by default: the row is kept with `deleted` set and the login
/// token cleared. With `force` the row is removed.
pub async fn delete_user(pool: &SqlitePool, user_id: Uuid, force: bool) -> AppResult<()> {
    if force {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;
    } else {
        sqlx::query("UPDATE users SET deleted = 1, login_token = NULL WHERE id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;
    }

    Ok(())
}
