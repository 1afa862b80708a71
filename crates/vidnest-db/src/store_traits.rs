//! Store abstractions used by the API handlers.
//!
//! Each trait covers one collection. Read operations that the handlers present
//! as joined documents (feed rows, video details, comment listings) are part
//! of the owning collection's trait, since the implementation performs the
//! join.

use async_trait::async_trait;
use uuid::Uuid;
use vidnest_core::models::{
    Comment, CommentDetails, Like, LikeTarget, MediaAsset, NewPlaylist, NewVideo, PageRequest,
    Paginated, Playlist, User, Video, VideoDetails, VideoListItem,
};
use vidnest_core::AppError;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Whether `video_id` is already in the user's watch history.
    async fn has_watched(&self, user_id: Uuid, video_id: Uuid) -> Result<bool, AppError>;

    /// Append to the watch history without checking for duplicates.
    async fn push_watch_history(&self, user_id: Uuid, video_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn create(&self, video: NewVideo) -> Result<Video, AppError>;

    /// Feed page: every video with its owner and the owner's subscriber count.
    async fn list_with_owners(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<VideoListItem>, AppError>;

    /// `views += 1`; a missing id is not an error.
    async fn increment_views(&self, id: Uuid) -> Result<(), AppError>;

    /// Published video joined with its owner and likes, relative to `viewer`.
    /// Videos whose owner no longer exists are not returned.
    async fn find_published_details(
        &self,
        id: Uuid,
        viewer: Uuid,
    ) -> Result<Option<VideoDetails>, AppError>;

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Video>, AppError>;

    async fn set_thumbnail(
        &self,
        id: Uuid,
        thumbnail: &MediaAsset,
    ) -> Result<Option<Video>, AppError>;

    /// Writes only the publish flag.
    async fn set_published(&self, id: Uuid, is_published: bool)
        -> Result<Option<Video>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Comments of a video with author and like state, oldest first.
    async fn list_for_video(
        &self,
        video: Uuid,
        viewer: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<CommentDetails>, AppError>;

    async fn create(&self, content: &str, video: Uuid, owner: Uuid) -> Result<Comment, AppError>;

    async fn update_content(&self, id: Uuid, content: &str) -> Result<Option<Comment>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<Option<Comment>, AppError>;
}

#[async_trait]
pub trait PlaylistStore: Send + Sync {
    async fn create(&self, playlist: NewPlaylist) -> Result<Playlist, AppError>;

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Playlist>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Playlist>, AppError>;

    /// `None` when the playlist does not exist.
    async fn contains_video(&self, id: Uuid, video: Uuid) -> Result<Option<bool>, AppError>;

    /// Appends unconditionally; callers check [`PlaylistStore::contains_video`] first.
    async fn push_video(&self, id: Uuid, video: Uuid) -> Result<Option<Playlist>, AppError>;

    /// Removes every occurrence; absent ids leave the playlist unchanged.
    async fn pull_video(&self, id: Uuid, video: Uuid) -> Result<Option<Playlist>, AppError>;

    async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Option<Playlist>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<Option<Playlist>, AppError>;
}

#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Any like by `liked_by` on `target`.
    async fn find(&self, target: LikeTarget, liked_by: Uuid) -> Result<Option<Like>, AppError>;

    async fn create(&self, target: LikeTarget, liked_by: Uuid) -> Result<Like, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Videos liked by `user`, most recent like first.
    async fn liked_videos(&self, user: Uuid) -> Result<Vec<Video>, AppError>;
}
