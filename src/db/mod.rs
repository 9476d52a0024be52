//! Database layer
//!
//! SQLite-backed persistence for Villarent. The service ships as a single
//! binary with an embedded migration runner; the pool is created from
//! configuration at startup.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
