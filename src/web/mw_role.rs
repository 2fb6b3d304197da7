// src/web/mw_role.rs
use crate::{
    error::AppError,
    models::user::{Claims, Role},
};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};

/// Whether the claims grant access to a route reserved for `required`.
pub fn role_allows(claims: &Claims, required: Role) -> bool {
    match (claims.role, required) {
        (Role::Admin, Role::Admin) => true,
        (Role::Faculty, Role::Faculty) => true,
        (Role::Admin, Role::Faculty) | (Role::Faculty, Role::Admin) => false,
    }
}

fn check_role(claims: &Claims, required: Role) -> Result<(), AppError> {
    if role_allows(claims, required) {
        tracing::debug!("Role MW: {} access granted to {}", required, claims.user_id);
        Ok(())
    } else {
        tracing::warn!("Role MW: access denied to {} ({} route, has {}).", claims.user_id, required, claims.role);
        Err(AppError::Forbidden(format!("only {} can access", required)))
    }
}

/// Must run *after* `require_auth`, which puts the Claims in the extensions.
pub async fn require_admin(
    Extension(claims): Extension<Claims>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_role(&claims, Role::Admin)?;
    Ok(next.run(request).await)
}

/// Must run *after* `require_auth`.
pub async fn require_faculty(
    Extension(claims): Extension<Claims>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_role(&claims, Role::Faculty)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role) -> Claims {
        Claims {
            user_id: "u-1".into(),
            email: "u@school.edu".into(),
            role,
        }
    }

    #[test]
    fn each_role_only_opens_its_own_routes() {
        assert!(role_allows(&claims(Role::Admin), Role::Admin));
        assert!(role_allows(&claims(Role::Faculty), Role::Faculty));
        assert!(!role_allows(&claims(Role::Admin), Role::Faculty));
        assert!(!role_allows(&claims(Role::Faculty), Role::Admin));
    }

    #[test]
    fn denial_is_forbidden() {
        assert!(matches!(check_role(&claims(Role::Faculty), Role::Admin), Err(AppError::Forbidden(_))));
    }
}
