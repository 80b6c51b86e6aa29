//! Skycast library
//!
//! Exposes the application modules for use in integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod search;
pub mod store;
pub mod ui;
pub mod units;
