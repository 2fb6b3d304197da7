// src/services/token_service.rs
//! Opaque bearer tokens persisted in `auth_tokens`, in the spirit of a
//! server-side session store: the token itself carries nothing, the row
//! says who it belongs to and until when.
use crate::{
    error::{AppError, AppResult},
    models::user::{Claims, Role},
};
use chrono::{Duration, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct ClaimsRow {
    user_id: String,
    email: String,
    role: Role,
}

fn new_token() -> String {
    // 244 random bits
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Issues a token for the user, valid for `ttl_hours`.
pub async fn issue_token(db_pool: &SqlitePool, user_id: &str, ttl_hours: i64) -> AppResult<String> {
    let expires_at = Duration::try_hours(ttl_hours)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| AppError::Config(format!("token lifetime of {} hours is out of range", ttl_hours)))?
        .timestamp();
    let token = new_token();

    sqlx::query("INSERT INTO auth_tokens (token, user_id, expires_at) VALUES (?1, ?2, ?3)")
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .execute(db_pool)
        .await?;

    tracing::debug!("Token issued for user {} (expires at {}).", user_id, expires_at);
    Ok(token)
}

/// Resolves a token into the claims of its owner, if still valid.
pub async fn verify_token(db_pool: &SqlitePool, token: &str) -> AppResult<Claims> {
    let row = sqlx::query_as::<_, ClaimsRow>(
        r#"
        SELECT u.id AS user_id, u.email, u.role
        FROM auth_tokens t
        JOIN users u ON u.id = t.user_id
        WHERE t.token = ?1 AND t.expires_at > ?2
        "#,
    )
    .bind(token)
    .bind(Utc::now().timestamp())
    .fetch_optional(db_pool)
    .await?;

    match row {
        Some(row) => Ok(Claims {
            user_id: row.user_id,
            email: row.email,
            role: row.role,
        }),
        None => Err(AppError::Unauthenticated("invalid or expired token".into())),
    }
}

/// Revokes a single token. Revoking an unknown token is not an error.
pub async fn revoke_token(db_pool: &SqlitePool, token: &str) -> AppResult<()> {
    sqlx::query("DELETE FROM auth_tokens WHERE token = ?1")
        .bind(token)
        .execute(db_pool)
        .await?;
    Ok(())
}

/// Deletes every expired token. Returns how many rows went away.
pub async fn purge_expired(db_pool: &SqlitePool) -> AppResult<u64> {
    let removed = sqlx::query("DELETE FROM auth_tokens WHERE expires_at <= ?1")
        .bind(Utc::now().timestamp())
        .execute(db_pool)
        .await?
        .rows_affected();
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_long_and_distinct() {
        let a = new_token();
        let b = new_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
