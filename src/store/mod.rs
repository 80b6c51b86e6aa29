//! Durable local storage for Skycast
//!
//! Holds the recent-search list, the only piece of state that survives a
//! restart.

pub mod recent;

pub use recent::{push_recent, RecentStore, MAX_RECENT};
