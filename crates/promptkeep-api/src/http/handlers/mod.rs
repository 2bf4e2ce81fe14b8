//! Route handlers, grouped by the store they drive.

pub mod favorite;
pub mod history;
pub mod storage;
pub mod translate;
