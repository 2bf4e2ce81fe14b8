//! Store and domain logic for promptkeep.
//!
//! This crate defines the storage port ([`storage::backend::DocumentBackend`])
//! that the infrastructure layer implements, the per-key locked document and
//! list stores built on it, and the history/favorites services. It depends
//! only on `promptkeep-types` -- never on `promptkeep-infra` or any file I/O.

pub mod service;
pub mod storage;
pub mod translate;
