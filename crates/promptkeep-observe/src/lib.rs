//! Observability setup for promptkeep.

pub mod tracing_setup;
