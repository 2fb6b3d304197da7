// src/services/user_service.rs
use crate::{
    config::AdminSeed,
    error::AppResult,
    models::user::{Role, User},
    services::auth_service,
};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Looks a user up by email (case-insensitive, per the column collation).
pub async fn find_user_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    tracing::debug!("Looking up user by email: {}", email);
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, role
        FROM users
        WHERE email = ?1
        "#,
    )
    .bind(email)
    .fetch_optional(db_pool)
    .await?;

    if user.is_some() {
        tracing::debug!("User '{}' found.", email);
    } else {
        tracing::debug!("User '{}' not found.", email);
    }
    Ok(user)
}

/// Inserts a user row. A duplicate email comes back as a unique-violation SqlxError.
pub async fn insert_user(db_pool: &SqlitePool, user: &User) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role)
    .execute(db_pool)
    .await?;
    Ok(())
}

/// Makes sure the configured admin exists. Returns true when it was created now.
pub async fn ensure_admin(db_pool: &SqlitePool, seed: &AdminSeed, bcrypt_cost: u32) -> AppResult<bool> {
    if let Some(existing) = find_user_by_email(db_pool, &seed.email).await? {
        if existing.role != Role::Admin {
            tracing::warn!(
                "⚠️ Admin seed email '{}' belongs to a {} account; leaving it untouched.",
                seed.email,
                existing.role
            );
        }
        return Ok(false);
    }

    let password_hash = auth_service::hash_password(&seed.password, bcrypt_cost).await?;
    let admin = User {
        id: Uuid::new_v4().to_string(),
        name: seed.name.clone(),
        email: seed.email.clone(),
        password_hash,
        role: Role::Admin,
    };
    insert_user(db_pool, &admin).await?;
    tracing::info!("✅ Admin account '{}' created.", admin.email);
    Ok(true)
}
