// tests/common/mod.rs
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use classbook::{
    config::AdminSeed,
    db,
    services::user_service,
    state::{AppState, AuthSettings},
    web::routes::create_router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@school.edu";
pub const ADMIN_PASSWORD: &str = "AdminPass123!";
pub const FACULTY_PASSWORD: &str = "StrongPass123!";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

/// Fresh in-memory database with migrations applied and a seeded admin.
pub async fn spawn_app() -> TestApp {
    let pool = db::create_db_pool("sqlite::memory:").await.expect("in-memory pool");
    let seed = AdminSeed {
        name: "Admin".into(),
        email: ADMIN_EMAIL.into(),
        password: ADMIN_PASSWORD.into(),
    };
    user_service::ensure_admin(&pool, &seed, 4).await.expect("seed admin");

    let state = AppState {
        db_pool: pool.clone(),
        auth: AuthSettings {
            token_ttl_hours: 1,
            bcrypt_cost: 4,
        },
    };
    TestApp {
        router: create_router(state),
        pool,
    }
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .send(Method::POST, "/api/v1/login", None, Some(json!({ "email": email, "password": password })))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"]["token"].as_str().expect("token").to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn faculty_token(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/signup",
                None,
                Some(json!({ "name": "Prof", "email": email, "password": FACULTY_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {body}");
        body["data"]["token"].as_str().expect("token").to_string()
    }

    /// Creates a student through the API and returns its ID.
    pub async fn create_student(&self, admin: &str, roll: &str, name: &str, class_id: &str, semester: i64) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/students",
                Some(admin),
                Some(json!({ "roll_number": roll, "name": name, "classID": class_id, "semester": semester })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create student failed: {body}");
        body["data"]["studentID"].as_str().expect("studentID").to_string()
    }

    pub async fn add_grade(&self, faculty: &str, student_id: &str, subject: &str, semester: i64, grade: i64) -> StatusCode {
        let (status, _) = self
            .send(
                Method::POST,
                "/api/v1/grades",
                Some(faculty),
                Some(json!({ "studentID": student_id, "subjectID": subject, "semester": semester, "grade": grade })),
            )
            .await;
        status
    }
}
