//! Item store orchestrator.
//!
//! The store is the only writer of item state; every mutation goes through
//! the placement engine first.

mod core;

pub use self::core::{Item, ItemId, ItemStore, Proposal};
