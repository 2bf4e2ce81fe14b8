//! Domain services layered on the list store.
//!
//! History and favorites are both list documents; the services add item
//! minting, id lookup, capacity, ordering, and cross-list favorite checks.

pub mod favorite;
pub mod history;
