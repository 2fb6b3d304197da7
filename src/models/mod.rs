// src/models/mod.rs
pub mod grade;
pub mod student;
pub mod user;
