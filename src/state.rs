// src/state.rs
use crate::config::Config;
use sqlx::SqlitePool;

/// Settings the auth flow needs on every request.
#[derive(Debug, Clone, Copy)]
pub struct AuthSettings {
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl From<&Config> for AuthSettings {
    fn from(config: &Config) -> Self {
        AuthSettings {
            token_ttl_hours: config.token_ttl_hours,
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub auth: AuthSettings,
}

// Lets handlers extract the pool directly
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}
