// src/web/student_handlers.rs
use crate::{
    error::AppResult,
    models::{
        student::{CreateStudentRequest, Student, StudentPatch},
        user::Claims,
    },
    services::student_service,
    state::AppState,
    web::response::ApiResponse,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Json, Path, State,
    },
    http::StatusCode,
};

// POST /api/v1/students (admin)
pub async fn handle_create_student(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> AppResult<ApiResponse<Student>> {
    let Json(req) = payload?;
    tracing::info!("Admin {} creating student '{}'", claims.user_id, req.roll_number);

    let student =
        student_service::create_student(&state.db_pool, &req.roll_number, &req.name, &req.class_id, req.semester)
            .await?;

    Ok(ApiResponse::with_data(StatusCode::OK, "successfully added", student))
}

// GET /api/v1/students/{studentID} (admin)
pub async fn handle_get_student(
    State(state): State<AppState>,
    student_id: Result<Path<String>, PathRejection>,
) -> AppResult<ApiResponse<Student>> {
    let Path(student_id) = student_id?;
    let student = student_service::get_student(&state.db_pool, &student_id).await?;
    Ok(ApiResponse::ok(student))
}

// PATCH /api/v1/students/{studentID} (admin)
pub async fn handle_update_student(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    student_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> AppResult<ApiResponse<Student>> {
    let Path(student_id) = student_id?;
    let Json(patch) = payload?;
    tracing::info!("Admin {} updating student {}", claims.user_id, student_id);

    let student = student_service::update_student(&state.db_pool, &student_id, patch).await?;
    Ok(ApiResponse::with_data(StatusCode::OK, "updated successfully", student))
}
