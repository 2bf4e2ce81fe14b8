//! HTTP layer for promptkeep.
//!
//! Axum-based JSON API under `/physton_prompt/`. Every endpoint answers with
//! HTTP 200; failures carry `"success": false` and a `message` in the body.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
