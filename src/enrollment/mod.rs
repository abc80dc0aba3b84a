//! Enrollment ("matrícula") submissions: wire payload, normalization,
//! validation and the HTTP endpoints that turn them into a PDF.

pub mod handlers;
pub mod models;
pub mod validation;
