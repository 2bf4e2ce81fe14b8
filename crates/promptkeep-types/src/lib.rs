//! Shared domain types for promptkeep.
//!
//! This crate contains the types passed between the store, the domain layers
//! (history and favorites), and the HTTP/CLI adapters: documents, prompt items,
//! configuration, and the error enums.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod prompt;
pub mod storage;
pub mod translate;
