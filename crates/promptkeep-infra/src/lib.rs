//! Infrastructure layer for promptkeep.
//!
//! Contains implementations of the ports defined in `promptkeep-core`: the
//! JSON-file document backend, data directory resolution, and `config.toml`
//! loading.

pub mod config;
pub mod filesystem;
pub mod storage;
