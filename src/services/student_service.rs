// src/services/student_service.rs
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::student::{Student, StudentPatch},
};
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn find_student_by_id(db_pool: &SqlitePool, student_id: &str) -> AppResult<Option<Student>> {
    tracing::debug!("Looking up student by ID: {}", student_id);
    let student = sqlx::query_as::<_, Student>(
        "SELECT id, roll_number, name, class_id, semester FROM students WHERE id = ?1",
    )
    .bind(student_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(student)
}

pub async fn find_student_by_roll_number(db_pool: &SqlitePool, roll_number: &str) -> AppResult<Option<Student>> {
    tracing::debug!("Looking up student by roll number: {}", roll_number);
    let student = sqlx::query_as::<_, Student>(
        "SELECT id, roll_number, name, class_id, semester FROM students WHERE roll_number = ?1",
    )
    .bind(roll_number)
    .fetch_optional(db_pool)
    .await?;
    Ok(student)
}

/// Fetches one student or fails with NotFound.
pub async fn get_student(db_pool: &SqlitePool, student_id: &str) -> AppResult<Student> {
    find_student_by_id(db_pool, student_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("student {} not found", student_id)))
}

fn validate_fields(student: &Student) -> AppResult<()> {
    if student.name.trim().is_empty() {
        return Err(AppError::validation("name can't be empty"));
    }
    if student.roll_number.trim().is_empty() {
        return Err(AppError::validation("roll number can't be empty"));
    }
    if student.class_id.trim().is_empty() {
        return Err(AppError::validation("classID can't be empty"));
    }
    if student.semester < 1 {
        return Err(AppError::validation("semester must be a positive integer"));
    }
    Ok(())
}

fn roll_number_taken(roll_number: &str) -> AppError {
    AppError::conflict(format!("a student already exists with roll number {}", roll_number))
}

/// Registers a new student with a fresh ID.
pub async fn create_student(
    db_pool: &SqlitePool,
    roll_number: &str,
    name: &str,
    class_id: &str,
    semester: i64,
) -> AppResult<Student> {
    let student = Student {
        id: Uuid::new_v4().to_string(),
        roll_number: roll_number.trim().to_string(),
        name: name.trim().to_string(),
        class_id: class_id.trim().to_string(),
        semester,
    };

    if find_student_by_roll_number(db_pool, &student.roll_number).await?.is_some() {
        tracing::warn!("Create rejected: roll number '{}' already exists.", student.roll_number);
        return Err(roll_number_taken(&student.roll_number));
    }
    validate_fields(&student)?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO students (id, roll_number, name, class_id, semester)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&student.id)
    .bind(&student.roll_number)
    .bind(&student.name)
    .bind(&student.class_id)
    .bind(student.semester)
    .execute(db_pool)
    .await;

    // The UNIQUE index closes the gap between the pre-check and the insert
    if let Err(e) = inserted {
        if is_unique_violation(&e) {
            tracing::warn!("Create lost a race on roll number '{}'.", student.roll_number);
            return Err(roll_number_taken(&student.roll_number));
        }
        return Err(e.into());
    }

    tracing::info!("✅ Student '{}' created ({}).", student.roll_number, student.id);
    Ok(student)
}

/// Applies a partial update and returns the merged record.
pub async fn update_student(db_pool: &SqlitePool, student_id: &str, patch: StudentPatch) -> AppResult<Student> {
    tracing::info!("Updating student: {}", student_id);
    let existing = get_student(db_pool, student_id).await?;

    let patch = patch.normalized();
    if patch.is_empty() {
        tracing::debug!("Empty patch for student {}; nothing to do.", student_id);
        return Ok(existing);
    }

    let merged = patch.apply_to(existing);
    validate_fields(&merged)?;

    let result = sqlx::query(
        r#"
        UPDATE students
        SET name = ?1, roll_number = ?2, class_id = ?3, semester = ?4
        WHERE id = ?5
        "#,
    )
    .bind(&merged.name)
    .bind(&merged.roll_number)
    .bind(&merged.class_id)
    .bind(merged.semester)
    .bind(student_id)
    .execute(db_pool)
    .await;

    let rows_affected = match result {
        Ok(done) => done.rows_affected(),
        Err(e) if is_unique_violation(&e) => return Err(roll_number_taken(&merged.roll_number)),
        Err(e) => return Err(e.into()),
    };

    if rows_affected == 0 {
        // Deleted between the read and the write
        return Err(AppError::not_found(format!("student {} not found", student_id)));
    }

    tracing::info!("✅ Student {} updated.", student_id);
    Ok(merged)
}
