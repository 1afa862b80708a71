//! Test helpers
//!
//! In-memory [`Storage`](crate::Storage) and staging helpers for tests.

mod mock_storage;

pub use mock_storage::*;
