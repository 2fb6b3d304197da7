// tests/auth_flow.rs
mod common;

use axum::http::{Method, StatusCode};
use classbook::{error::AppError, services::token_service};
use common::{spawn_app, FACULTY_PASSWORD};
use serde_json::json;

#[tokio::test]
async fn signup_rejects_weak_password() {
    let app = spawn_app().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/signup",
            None,
            Some(json!({ "name": "Weak", "email": "weak@school.edu", "password": "weak" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status_code"], 400);
    assert!(body["message"].as_str().unwrap().contains("at least 12"));
}

#[tokio::test]
async fn signup_then_login_round_trip() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/signup",
            None,
            Some(json!({ "name": "Grace", "email": "grace@school.edu", "password": FACULTY_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/login",
            None,
            Some(json!({ "email": "grace@school.edu", "password": FACULTY_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/login",
            None,
            Some(json!({ "email": "grace@school.edu", "password": "WrongPass123!" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid email or password");
}

#[tokio::test]
async fn unknown_email_looks_like_a_wrong_password() {
    let app = spawn_app().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/login",
            None,
            Some(json!({ "email": "nobody@school.edu", "password": FACULTY_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid email or password");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = spawn_app().await;
    app.faculty_token("dup@school.edu").await;

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/signup",
            None,
            Some(json!({ "name": "Again", "email": "DUP@school.edu", "password": FACULTY_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = 'dup@school.edu'")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(users, 1);
}

#[tokio::test]
async fn invalid_email_and_malformed_body_are_bad_requests() {
    let app = spawn_app().await;
    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/signup",
            None,
            Some(json!({ "name": "X", "email": "not-an-email", "password": FACULTY_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(Method::POST, "/api/v1/login", None, Some(json!(["not", "an", "object"])))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid request body");
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let app = spawn_app().await;

    let (status, _) = app.send(Method::GET, "/api/v1/grades?classID=CS101&semester=1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::GET, "/api/v1/grades?classID=CS101&semester=1", Some("made-up-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn roles_gate_admin_and_faculty_routes() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let faculty = app.faculty_token("prof@school.edu").await;

    // faculty can't register students
    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/students",
            Some(&faculty),
            Some(json!({ "roll_number": "R1", "name": "Ada", "classID": "CS101", "semester": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "only admin can access");

    // admin can't touch grades
    let (status, _) = app
        .send(Method::GET, "/api/v1/grades?classID=CS101&semester=1", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let app = spawn_app().await;
    let faculty = app.faculty_token("leaving@school.edu").await;

    let (status, _) = app.send(Method::POST, "/api/v1/logout", Some(&faculty), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::GET, "/api/v1/grades?classID=CS101&semester=1", Some(&faculty), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_tokens_are_rejected_and_purged() {
    let app = spawn_app().await;
    let faculty = app.faculty_token("old@school.edu").await;

    sqlx::query("UPDATE auth_tokens SET expires_at = 0 WHERE token = ?1")
        .bind(&faculty)
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, _) = app
        .send(Method::GET, "/api/v1/grades?classID=CS101&semester=1", Some(&faculty), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let purged = classbook::services::token_service::purge_expired(&app.pool).await.unwrap();
    assert_eq!(purged, 1);
}

#[tokio::test]
async fn out_of_range_token_lifetime_is_an_error_not_a_panic() {
    let app = spawn_app().await;
    let admin_id: String = sqlx::query_scalar("SELECT id FROM users LIMIT 1")
        .fetch_one(&app.pool)
        .await
        .unwrap();

    let result = token_service::issue_token(&app.pool, &admin_id, i64::MAX).await;
    assert!(matches!(result, Err(AppError::Config(_))));

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM auth_tokens")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);

    // the configured maximum still works
    let token = token_service::issue_token(&app.pool, &admin_id, classbook::config::MAX_TOKEN_TTL_HOURS)
        .await
        .unwrap();
    assert!(token_service::verify_token(&app.pool, &token).await.is_ok());
}

#[tokio::test]
async fn unknown_routes_and_methods_get_the_json_envelope() {
    let app = spawn_app().await;
    let faculty = app.faculty_token("prof@school.edu").await;

    let (status, body) = app.send(Method::DELETE, "/api/v1/grades", Some(&faculty), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["message"], "method not allowed");
    assert_eq!(body["status_code"], 405);

    let (status, body) = app.send(Method::GET, "/api/v1/nowhere", Some(&faculty), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "route not found");
}
