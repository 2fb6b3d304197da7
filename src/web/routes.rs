// src/web/routes.rs
use crate::{
    state::AppState,
    web::{auth_handlers, grade_handlers, mw_auth, mw_role, response::ApiResponse, student_handlers},
};
use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Public routes ---
    let public_routes = Router::new()
        .route("/signup", post(auth_handlers::handle_signup))
        .route("/login", post(auth_handlers::handle_login));

    // --- Admin routes ---
    let student_routes = Router::new()
        .route("/", post(student_handlers::handle_create_student))
        .route(
            "/{studentID}",
            get(student_handlers::handle_get_student).patch(student_handlers::handle_update_student),
        )
        // Only the role check here; require_auth is applied by the parent router
        .route_layer(middleware::from_fn(mw_role::require_admin));

    // --- Faculty routes ---
    let grade_routes = Router::new()
        .route(
            "/",
            get(grade_handlers::handle_class_average)
                .post(grade_handlers::handle_add_grade)
                .patch(grade_handlers::handle_update_grade),
        )
        .route("/toppers", get(grade_handlers::handle_toppers))
        .route("/students/{studentID}", get(grade_handlers::handle_student_average))
        .route_layer(middleware::from_fn(mw_role::require_faculty));

    // --- Authenticated routes (any role) ---
    let authenticated_routes = Router::new()
        .route("/logout", post(auth_handlers::handle_logout))
        .nest("/students", student_routes)
        .nest("/grades", grade_routes)
        // require_auth covers everything above, nested routers included
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    let api_v1 = Router::new().merge(public_routes).merge(authenticated_routes);

    Router::new()
        .nest("/api/v1", api_v1)
        .fallback(|| async { ApiResponse::<()>::message(StatusCode::NOT_FOUND, "route not found") })
        .method_not_allowed_fallback(|| async {
            ApiResponse::<()>::message(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
        })
        .with_state(app_state)
}
