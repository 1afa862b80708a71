//! Postgres repositories
//!
//! One repository per collection. Joins that the API presents as embedded
//! documents (owners, subscriber counts, like state) are written out here as
//! SQL joins and correlated sub-selects.

mod comment;
mod like;
mod playlist;
mod user;
mod video;

pub use comment::CommentRepository;
pub use like::LikeRepository;
pub use playlist::PlaylistRepository;
pub use user::UserRepository;
pub use video::VideoRepository;

/// Column list of `videos`, in `VideoRow` order.
pub(crate) const VIDEO_COLUMNS: &str = "id, video_public_id, video_url, thumbnail_public_id, \
     thumbnail_url, title, description, duration, views, is_published, owner, created_at, updated_at";
