// src/models/student.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Student {
    #[serde(rename = "studentID")]
    pub id: String,
    pub roll_number: String,
    pub name: String,
    #[serde(rename = "classID")]
    pub class_id: String,
    pub semester: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub roll_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "classID", default)]
    pub class_id: String,
    #[serde(default)]
    pub semester: i64,
}

/// PATCH body: absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct StudentPatch {
    pub roll_number: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "classID")]
    pub class_id: Option<String>,
    pub semester: Option<i64>,
}

impl StudentPatch {
    /// Folds empty strings and a zero semester into "not supplied", so old
    /// clients that send zero values keep the record unchanged.
    pub fn normalized(self) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        StudentPatch {
            roll_number: keep(self.roll_number),
            name: keep(self.name),
            class_id: keep(self.class_id),
            semester: self.semester.filter(|s| *s != 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roll_number.is_none() && self.name.is_none() && self.class_id.is_none() && self.semester.is_none()
    }

    /// Applies the supplied fields on top of an existing record.
    pub fn apply_to(self, mut student: Student) -> Student {
        if let Some(name) = self.name {
            student.name = name;
        }
        if let Some(roll_number) = self.roll_number {
            student.roll_number = roll_number;
        }
        if let Some(class_id) = self.class_id {
            student.class_id = class_id;
        }
        if let Some(semester) = self.semester {
            student.semester = semester;
        }
        student
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Student {
        Student {
            id: "s-1".into(),
            roll_number: "R-001".into(),
            name: "Ada".into(),
            class_id: "CS101".into(),
            semester: 1,
        }
    }

    #[test]
    fn empty_and_zero_values_mean_unchanged() {
        let patch = StudentPatch {
            roll_number: Some(String::new()),
            name: Some("   ".into()),
            class_id: None,
            semester: Some(0),
        }
        .normalized();
        assert!(patch.is_empty());
        assert_eq!(patch.apply_to(sample()), sample());
    }

    #[test]
    fn supplied_fields_overwrite() {
        let patch = StudentPatch {
            name: Some("Ada Lovelace".into()),
            semester: Some(2),
            ..Default::default()
        }
        .normalized();
        let merged = patch.apply_to(sample());
        assert_eq!(merged.name, "Ada Lovelace");
        assert_eq!(merged.semester, 2);
        assert_eq!(merged.roll_number, "R-001");
        assert_eq!(merged.class_id, "CS101");
    }
}
