// src/main.rs
use axum::serve;
use classbook::{
    config::Config,
    db,
    services::{token_service, user_service},
    state::{AppState, AuthSettings},
    web,
};
use std::env;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Expired tokens are purged this often
const TOKEN_PURGE_INTERVAL_SECS: u64 = 60 * 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Logging (tracing) ---
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "classbook=debug,tower_http=info,sqlx=warn".into())
                .into()
        }))
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Starting classbook server...");

    // --- Configuration ---
    let config = Config::from_env().map_err(|e| {
        tracing::error!("❌ Invalid configuration: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // --- Database ---
    let db_pool = match db::create_db_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Critical failure initialising the database: {}", e);
            return Err(anyhow::anyhow!("Failed to connect/migrate DB: {}", e));
        }
    };

    if let Some(seed) = &config.admin {
        user_service::ensure_admin(&db_pool, seed, config.bcrypt_cost)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create admin account: {}", e))?;
    } else {
        tracing::warn!("⚠️ ADMIN_EMAIL/ADMIN_PASSWORD not set; no admin account is bootstrapped.");
    }

    // --- Expired token cleanup ---
    let purge_pool = db_pool.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(TOKEN_PURGE_INTERVAL_SECS));
        loop {
            interval.tick().await;
            match token_service::purge_expired(&purge_pool).await {
                Ok(0) => {}
                Ok(n) => tracing::info!("🧹 {} expired tokens purged.", n),
                Err(e) => tracing::error!("Token cleanup task failed: {:?}", e),
            }
        }
    });
    tracing::info!("🧹 Token cleanup task started.");

    let app_state = AppState {
        db_pool,
        auth: AuthSettings::from(&config),
    };

    // --- Listener ---
    let addr = config.bind_addr;
    tracing::info!("📡 Listening on http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Failed to bind {}: {}", addr, e);
            return Err(e.into());
        }
    };

    // --- Router and middleware layers ---
    let app = web::routes::create_router(app_state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    tracing::info!("👂 Server ready to accept connections...");
    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Fatal server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
