// src/services/grade_service.rs
//! Grade recording and class statistics.
//!
//! A class average is the mean of the per-student means: every student with
//! at least one grade in the class/semester counts once, however many
//! subjects they have. Toppers are ranked on the same per-student means.
use crate::{
    error::{is_foreign_key_violation, is_unique_violation, AppError, AppResult},
    models::grade::StudentAverage,
    services::student_service,
};
use std::cmp::Ordering;
use sqlx::SqlitePool;

fn require_non_empty(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} can't be empty", field)));
    }
    Ok(())
}

fn require_non_negative_grade(grade: i64) -> AppResult<()> {
    if grade < 0 {
        return Err(AppError::validation("grade can't be negative"));
    }
    Ok(())
}

// --- Ranking ---

/// Orders by average descending, ties by student ID ascending, keeps `limit` entries.
pub fn rank_toppers(mut averages: Vec<StudentAverage>, limit: usize) -> Vec<StudentAverage> {
    averages.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.student_id.cmp(&b.student_id))
    });
    averages.truncate(limit);
    averages
}

// --- Queries ---

/// Per-student averages for a class/semester, in no particular order.
pub async fn student_averages_of_class(
    db_pool: &SqlitePool,
    class_id: &str,
    semester: i64,
) -> AppResult<Vec<StudentAverage>> {
    tracing::debug!("Fetching per-student averages for class {} semester {}", class_id, semester);
    let averages = sqlx::query_as::<_, StudentAverage>(
        r#"
        SELECT s.id AS student_id, s.name AS student_name, CAST(AVG(g.grade) AS REAL) AS average
        FROM grades g
        JOIN students s ON s.id = g.student_id
        WHERE s.class_id = ?1 AND g.semester = ?2
        GROUP BY s.id, s.name
        "#,
    )
    .bind(class_id)
    .bind(semester)
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("{} students with grades.", averages.len());
    Ok(averages)
}

/// Average grade of a class in a semester; `None` when nothing is recorded.
pub async fn class_average(db_pool: &SqlitePool, class_id: &str, semester: i64) -> AppResult<Option<f64>> {
    require_non_empty(class_id, "classID")?;

    let average: Option<f64> = sqlx::query_scalar(
        r#"
        SELECT CAST(AVG(per_student.average) AS REAL)
        FROM (
            SELECT AVG(g.grade) AS average
            FROM grades g
            JOIN students s ON s.id = g.student_id
            WHERE s.class_id = ?1 AND g.semester = ?2
            GROUP BY g.student_id
        ) AS per_student
        "#,
    )
    .bind(class_id)
    .bind(semester)
    .fetch_one(db_pool)
    .await?;

    tracing::debug!("Class {} semester {} average: {:?}", class_id, semester, average);
    Ok(average)
}

/// The `limit` best students of a class/semester by average grade.
pub async fn toppers(
    db_pool: &SqlitePool,
    class_id: &str,
    semester: i64,
    limit: i64,
) -> AppResult<Vec<StudentAverage>> {
    require_non_empty(class_id, "classID")?;
    if semester < 0 {
        return Err(AppError::validation("semester can't be negative"));
    }
    let limit = usize::try_from(limit).map_err(|_| AppError::validation("limit can't be negative"))?;
    if limit == 0 {
        return Ok(Vec::new());
    }

    let averages = student_averages_of_class(db_pool, class_id, semester).await?;
    Ok(rank_toppers(averages, limit))
}

/// Average of one student's grades in a semester; `None` when they have none.
pub async fn student_average(db_pool: &SqlitePool, student_id: &str, semester: i64) -> AppResult<Option<f64>> {
    require_non_empty(student_id, "studentID")?;
    // Unknown students are a 404, not an empty average
    student_service::get_student(db_pool, student_id).await?;

    let average: Option<f64> = sqlx::query_scalar(
        "SELECT CAST(AVG(grade) AS REAL) FROM grades WHERE student_id = ?1 AND semester = ?2",
    )
    .bind(student_id)
    .bind(semester)
    .fetch_one(db_pool)
    .await?;
    Ok(average)
}

// --- Mutations ---

/// Records a grade. One grade per student, subject and semester.
pub async fn record_grade(
    db_pool: &SqlitePool,
    student_id: &str,
    subject_id: &str,
    grade: i64,
    semester: i64,
) -> AppResult<()> {
    require_non_negative_grade(grade)?;
    require_non_empty(student_id, "studentID")?;
    require_non_empty(subject_id, "subjectID")?;
    if semester < 1 {
        return Err(AppError::validation("semester must be a positive integer"));
    }

    let inserted = sqlx::query(
        r#"
        INSERT INTO grades (student_id, subject_id, semester, grade)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(student_id)
    .bind(subject_id)
    .bind(semester)
    .bind(grade)
    .execute(db_pool)
    .await;

    match inserted {
        Ok(_) => {
            tracing::info!(
                "✅ Grade {} recorded for student {} subject {} semester {}.",
                grade,
                student_id,
                subject_id,
                semester
            );
            Ok(())
        }
        Err(e) if is_unique_violation(&e) => Err(AppError::conflict(format!(
            "a grade for subject {} in semester {} is already recorded; amend it instead",
            subject_id, semester
        ))),
        Err(e) if is_foreign_key_violation(&e) => {
            Err(AppError::not_found(format!("student {} not found", student_id)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Changes an existing grade. Fails with NotFound when nothing matched.
pub async fn amend_grade(
    db_pool: &SqlitePool,
    student_id: &str,
    subject_id: &str,
    new_grade: i64,
    semester: Option<i64>,
) -> AppResult<u64> {
    require_non_negative_grade(new_grade)?;
    require_non_empty(student_id, "studentID")?;
    require_non_empty(subject_id, "subjectID")?;

    let rows_affected = sqlx::query(
        r#"
        UPDATE grades
        SET grade = ?1
        WHERE student_id = ?2 AND subject_id = ?3 AND (?4 IS NULL OR semester = ?4)
        "#,
    )
    .bind(new_grade)
    .bind(student_id)
    .bind(subject_id)
    .bind(semester)
    .execute(db_pool)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Amend matched no grade for student {} subject {}.", student_id, subject_id);
        return Err(AppError::not_found(format!(
            "no grade recorded for student {} in subject {}",
            student_id, subject_id
        )));
    }

    tracing::info!("✅ {} grade row(s) amended for student {} subject {}.", rows_affected, student_id, subject_id);
    Ok(rows_affected)
}
