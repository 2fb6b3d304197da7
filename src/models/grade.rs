// src/models/grade.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-student average inside a class/semester. Computed per query, never stored.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct StudentAverage {
    pub student_id: String,
    pub student_name: String,
    pub average: f64,
}

#[derive(Debug, Deserialize)]
pub struct AddGradeRequest {
    #[serde(rename = "studentID", default)]
    pub student_id: String,
    #[serde(rename = "subjectID", default)]
    pub subject_id: String,
    #[serde(default)]
    pub semester: i64,
    pub grade: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGradeRequest {
    #[serde(rename = "studentID", default)]
    pub student_id: String,
    #[serde(rename = "subjectID", default)]
    pub subject_id: String,
    pub new_grade: i64,
    // Narrows the update to one semester when given
    pub semester: Option<i64>,
}

// --- Query strings ---

#[derive(Debug, Deserialize)]
pub struct ClassQuery {
    #[serde(rename = "classID", default)]
    pub class_id: String,
    pub semester: i64,
}

#[derive(Debug, Deserialize)]
pub struct ToppersQuery {
    #[serde(rename = "classID", default)]
    pub class_id: String,
    pub semester: i64,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SemesterQuery {
    pub semester: i64,
}

#[derive(Debug, Serialize)]
pub struct ClassAverage {
    #[serde(rename = "classID")]
    pub class_id: String,
    pub semester: i64,
    pub average: f64,
}

#[derive(Debug, Serialize)]
pub struct StudentSemesterAverage {
    #[serde(rename = "studentID")]
    pub student_id: String,
    pub semester: i64,
    pub average: f64,
}
