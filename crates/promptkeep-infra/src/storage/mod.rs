//! Storage backends.

pub mod json_file;
