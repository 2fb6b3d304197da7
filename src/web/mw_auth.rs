// src/web/mw_auth.rs
use crate::{
    error::{AppError, AppResult},
    services::token_service,
    state::AppState,
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

/// The raw bearer token of the current request, for handlers that need it (logout).
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> AppResult<String> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthenticated("authorization header missing".into()))?
        .to_str()
        .map_err(|_| AppError::Unauthenticated("invalid authorization header format".into()))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim().to_string())
        }
        _ => Err(AppError::Unauthenticated("invalid authorization header format".into())),
    }
}

// Middleware: resolves the bearer token and stores the claims in the request extensions
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;
    let claims = token_service::verify_token(&state.db_pool, &token).await?;

    tracing::debug!("Auth MW: user '{}' ({}) authenticated.", claims.user_id, claims.role);

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(BearerToken(token));
    Ok(next.run(request).await)
}
