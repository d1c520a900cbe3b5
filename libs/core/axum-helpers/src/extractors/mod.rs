//! Custom extractors for Axum handlers.
//!
//! Rejections are reported through [`AppError`](crate::errors::AppError), so
//! every failed extraction answers with the same `{ "error": ... }` body as
//! the handlers themselves.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
