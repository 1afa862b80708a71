//! Vidnest persistence layer
//!
//! Store traits describe every read and write the API performs; the Postgres
//! repositories in [`db`] implement them, and `test_helpers` provides an
//! in-memory implementation for tests.

pub mod db;
pub mod store_traits;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use db::{
    CommentRepository, LikeRepository, PlaylistRepository, UserRepository, VideoRepository,
};
pub use store_traits::{CommentStore, LikeStore, PlaylistStore, UserStore, VideoStore};
