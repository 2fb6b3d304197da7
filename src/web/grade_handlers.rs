// src/web/grade_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::grade::{
        AddGradeRequest, ClassAverage, ClassQuery, SemesterQuery, StudentAverage, StudentSemesterAverage,
        ToppersQuery, UpdateGradeRequest,
    },
    services::grade_service,
    web::response::ApiResponse,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Json, Path, Query, State,
    },
    http::StatusCode,
};
use sqlx::SqlitePool;

// Used when the request leaves `limit` out
const DEFAULT_TOPPERS_LIMIT: i64 = 3;

// GET /api/v1/grades?classID=&semester=
pub async fn handle_class_average(
    State(db_pool): State<SqlitePool>,
    query: Result<Query<ClassQuery>, QueryRejection>,
) -> AppResult<ApiResponse<ClassAverage>> {
    let Query(q) = query?;

    match grade_service::class_average(&db_pool, &q.class_id, q.semester).await? {
        Some(average) => Ok(ApiResponse::ok(ClassAverage {
            class_id: q.class_id,
            semester: q.semester,
            average,
        })),
        None => Ok(ApiResponse::message(StatusCode::OK, "no grades recorded")),
    }
}

// GET /api/v1/grades/toppers?classID=&semester=&limit=
pub async fn handle_toppers(
    State(db_pool): State<SqlitePool>,
    query: Result<Query<ToppersQuery>, QueryRejection>,
) -> AppResult<ApiResponse<Vec<StudentAverage>>> {
    let Query(q) = query?;
    let limit = q.limit.unwrap_or(DEFAULT_TOPPERS_LIMIT);
    if limit < 0 {
        return Err(AppError::validation("limit can't be negative"));
    }

    let toppers = grade_service::toppers(&db_pool, &q.class_id, q.semester, limit).await?;
    Ok(ApiResponse::ok(toppers))
}

// GET /api/v1/grades/students/{studentID}?semester=
pub async fn handle_student_average(
    State(db_pool): State<SqlitePool>,
    student_id: Result<Path<String>, PathRejection>,
    query: Result<Query<SemesterQuery>, QueryRejection>,
) -> AppResult<ApiResponse<StudentSemesterAverage>> {
    let Path(student_id) = student_id?;
    let Query(q) = query?;

    match grade_service::student_average(&db_pool, &student_id, q.semester).await? {
        Some(average) => Ok(ApiResponse::ok(StudentSemesterAverage {
            student_id,
            semester: q.semester,
            average,
        })),
        None => Ok(ApiResponse::message(StatusCode::OK, "no grades recorded")),
    }
}

// POST /api/v1/grades
pub async fn handle_add_grade(
    State(db_pool): State<SqlitePool>,
    payload: Result<Json<AddGradeRequest>, JsonRejection>,
) -> AppResult<ApiResponse<()>> {
    let Json(req) = payload?;
    grade_service::record_grade(&db_pool, &req.student_id, &req.subject_id, req.grade, req.semester).await?;
    Ok(ApiResponse::message(StatusCode::CREATED, "grade successfully added"))
}

// PATCH /api/v1/grades
pub async fn handle_update_grade(
    State(db_pool): State<SqlitePool>,
    payload: Result<Json<UpdateGradeRequest>, JsonRejection>,
) -> AppResult<ApiResponse<()>> {
    let Json(req) = payload?;
    grade_service::amend_grade(&db_pool, &req.student_id, &req.subject_id, req.new_grade, req.semester).await?;
    Ok(ApiResponse::message(StatusCode::OK, "grade updated"))
}
