// src/services/auth_service.rs
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::user::{Role, User},
    services::user_service,
    state::AuthSettings,
};
use sqlx::SqlitePool;
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 12;
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-+";

// bcrypt is CPU-bound; run it off the async workers.
async fn run_bcrypt<T, F>(op: &'static str, job: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| {
            tracing::error!("bcrypt {} task did not complete: {:?}", op, e);
            AppError::InternalServerError
        })?
        .map_err(|e| {
            tracing::error!("bcrypt {} failed: {:?}", op, e);
            AppError::PasswordHashingError
        })
}

/// Login check: does `password` match the hash stored on the user row?
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let (password, stored_hash) = (password.to_owned(), stored_hash.to_owned());
    run_bcrypt("verify", move || bcrypt::verify(password, &stored_hash)).await
}

/// Hash stored for new faculty signups and the bootstrapped admin.
/// `cost` comes from `BCRYPT_COST` (tests use the minimum, 4).
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();
    tracing::debug!("Hashing password with bcrypt cost {}", cost);
    run_bcrypt("hash", move || bcrypt::hash(password, cost)).await
}

/// Loose shape check: `local@domain.tld`, one '@', no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Domain needs a dot with labels on both sides
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.starts_with('.') && !host.ends_with('.'),
        None => false,
    }
}

/// At least 12 characters with uppercase, lowercase, digit and a symbol.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Registers a faculty account. Token issuance is left to the caller.
pub async fn signup(
    db_pool: &SqlitePool,
    settings: &AuthSettings,
    name: &str,
    email: &str,
    password: &str,
) -> AppResult<User> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::validation("name, email and password can't be empty"));
    }
    if !is_valid_email(email) {
        return Err(AppError::validation("invalid email format"));
    }
    if !is_strong_password(password) {
        return Err(AppError::validation(format!(
            "password must be at least {} characters long, and include uppercase, lowercase, number, and symbol",
            MIN_PASSWORD_LEN
        )));
    }

    // Pre-check for a clear message; the UNIQUE index settles concurrent signups
    if user_service::find_user_by_email(db_pool, email).await?.is_some() {
        tracing::warn!("Signup rejected: email '{}' already registered.", email);
        return Err(AppError::conflict("email already in use"));
    }

    let password_hash = hash_password(password, settings.bcrypt_cost).await?;
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash,
        role: Role::Faculty,
    };

    match user_service::insert_user(db_pool, &user).await {
        Ok(()) => {}
        Err(AppError::SqlxError(e)) if is_unique_violation(&e) => {
            tracing::warn!("Signup lost a race on email '{}'.", email);
            return Err(AppError::conflict("email already in use"));
        }
        Err(e) => return Err(e),
    }

    tracing::info!("✅ Faculty account '{}' created ({}).", user.email, user.id);
    Ok(user)
}

/// Looks the user up by email and checks the password.
pub async fn validate_login(db_pool: &SqlitePool, email: &str, password: &str) -> AppResult<User> {
    let email = email.trim();
    tracing::info!("Login attempt for: {}", email);

    let user = match user_service::find_user_by_email(db_pool, email).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Login failed: no user with email '{}'.", email);
            return Err(AppError::UserNotFound);
        }
    };

    if verify_password(password, &user.password_hash).await? {
        tracing::info!("✅ Login succeeded for: {}", user.id);
        Ok(user)
    } else {
        tracing::warn!("Login failed: wrong password for '{}'.", email);
        Err(AppError::InvalidCredentials)
    }
}
