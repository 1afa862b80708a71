//! Test helpers
//!
//! An in-memory implementation of every store trait, so handlers and their
//! tests can run without Postgres.

mod memory_store;

pub use memory_store::InMemoryStore;
