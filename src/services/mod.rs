// src/services/mod.rs
pub mod auth_service;
pub mod grade_service;
pub mod student_service;
pub mod token_service;
pub mod user_service;
