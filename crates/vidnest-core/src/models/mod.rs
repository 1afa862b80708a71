//! Data models for the application
//!
//! One sub-module per collection, plus the pagination page shape shared by
//! every listing endpoint.

mod asset;
mod comment;
mod like;
mod pagination;
mod playlist;
mod user;
mod video;

pub use asset::*;
pub use comment::*;
pub use like::*;
pub use pagination::*;
pub use playlist::*;
pub use user::*;
pub use video::*;
