//! Per-key document and list storage.
//!
//! Layering, leaves first:
//! - [`key`]: storage key to file-safe name
//! - [`lock`]: one async mutex per storage key
//! - [`backend`]: raw read/write port, implemented in promptkeep-infra
//! - [`document`]: locked get/set of one JSON value per key
//! - [`list`]: locked read-modify-write list operations

pub mod backend;
pub mod document;
pub mod key;
pub mod list;
pub mod lock;
pub mod memory;
