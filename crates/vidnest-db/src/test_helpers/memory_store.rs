//! In-memory store
//!
//! Collections are kept in insertion order, which stands in for the
//! `created_at` ordering the Postgres queries use.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;
use vidnest_core::models::{
    ChannelSummary, Comment, CommentDetails, Like, LikeTarget, MediaAsset, NewPlaylist, NewVideo,
    PageRequest, Paginated, Playlist, Subscription, User, UserSummary, Video, VideoDetails,
    VideoListItem, VideoOwner,
};
use vidnest_core::AppError;

use crate::store_traits::{CommentStore, LikeStore, PlaylistStore, UserStore, VideoStore};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    subscriptions: Vec<Subscription>,
    videos: Vec<Video>,
    comments: Vec<Comment>,
    playlists: Vec<Playlist>,
    likes: Vec<Like>,
}

impl Collections {
    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn subscriber_count(&self, channel: Uuid) -> i64 {
        self.subscriptions
            .iter()
            .filter(|s| s.channel == channel)
            .count() as i64
    }

    fn is_subscribed(&self, channel: Uuid, subscriber: Uuid) -> bool {
        self.subscriptions
            .iter()
            .any(|s| s.channel == channel && s.subscriber == subscriber)
    }

    fn like_state(&self, target: LikeTarget, viewer: Uuid) -> (i64, bool) {
        let likes: Vec<&Like> = self.likes.iter().filter(|l| l.targets(&target)).collect();
        let liked = likes.iter().any(|l| l.liked_by == viewer);
        (likes.len() as i64, liked)
    }
}

/// Shared in-memory store; clones see the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Collections>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert a user with derived email/full name and an empty history.
    pub fn add_user(&self, username: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            full_name: username.to_uppercase(),
            avatar: format!("http://localhost/avatars/{username}.png"),
            cover_image: None,
            watch_history: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.lock().users.push(user.clone());
        user
    }

    pub fn remove_user(&self, id: Uuid) {
        self.lock().users.retain(|u| u.id != id);
    }

    pub fn add_subscription(&self, subscriber: Uuid, channel: Uuid) {
        self.lock().subscriptions.push(Subscription {
            id: Uuid::new_v4(),
            subscriber,
            channel,
            created_at: Utc::now(),
        });
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.lock().user(id).cloned()
    }

    pub fn video(&self, id: Uuid) -> Option<Video> {
        self.lock().videos.iter().find(|v| v.id == id).cloned()
    }

    pub fn video_count(&self) -> usize {
        self.lock().videos.len()
    }

    pub fn comment_count(&self) -> usize {
        self.lock().comments.len()
    }

    pub fn playlist(&self, id: Uuid) -> Option<Playlist> {
        self.lock().playlists.iter().find(|p| p.id == id).cloned()
    }

    pub fn like_count(&self) -> usize {
        self.lock().likes.len()
    }

    /// Insert a like directly, bypassing toggle semantics.
    pub fn add_like(&self, target: LikeTarget, liked_by: Uuid) -> Like {
        let like = new_like(target, liked_by);
        self.lock().likes.push(like.clone());
        like
    }
}

fn new_like(target: LikeTarget, liked_by: Uuid) -> Like {
    let now = Utc::now();
    let (video, comment, tweet) = match target {
        LikeTarget::Video(id) => (Some(id), None, None),
        LikeTarget::Comment(id) => (None, Some(id), None),
        LikeTarget::Tweet(id) => (None, None, Some(id)),
    };
    Like {
        id: Uuid::new_v4(),
        video,
        comment,
        tweet,
        liked_by,
        created_at: now,
        updated_at: now,
    }
}

fn page_of<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    items
        .iter()
        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.user(id))
    }

    async fn has_watched(&self, user_id: Uuid, video_id: Uuid) -> Result<bool, AppError> {
        Ok(self
            .lock()
            .user(user_id)
            .map(|u| u.watch_history.contains(&video_id))
            .unwrap_or(false))
    }

    async fn push_watch_history(&self, user_id: Uuid, video_id: Uuid) -> Result<(), AppError> {
        let mut data = self.lock();
        if let Some(user) = data.users.iter_mut().find(|u| u.id == user_id) {
            user.watch_history.push(video_id);
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl VideoStore for InMemoryStore {
    async fn create(&self, video: NewVideo) -> Result<Video, AppError> {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            video: video.video,
            thumbnail: video.thumbnail,
            title: video.title,
            description: video.description,
            duration: video.duration,
            views: 0,
            is_published: true,
            owner: video.owner,
            created_at: now,
            updated_at: now,
        };
        self.lock().videos.push(video.clone());
        Ok(video)
    }

    async fn list_with_owners(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<VideoListItem>, AppError> {
        let data = self.lock();
        let docs = page_of(&data.videos, page)
            .into_iter()
            .map(|video| {
                let owner = data.user(video.owner).map(|u| ChannelSummary {
                    id: u.id,
                    username: u.username.clone(),
                    full_name: u.full_name.clone(),
                    avatar: u.avatar.clone(),
                    subscribers_count: data.subscriber_count(u.id),
                });
                VideoListItem::new(video, owner)
            })
            .collect();
        Ok(Paginated::new(docs, data.videos.len() as i64, page))
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), AppError> {
        if let Some(video) = self.lock().videos.iter_mut().find(|v| v.id == id) {
            video.views += 1;
        }
        Ok(())
    }

    async fn find_published_details(
        &self,
        id: Uuid,
        viewer: Uuid,
    ) -> Result<Option<VideoDetails>, AppError> {
        let data = self.lock();
        let Some(video) = data
            .videos
            .iter()
            .find(|v| v.id == id && v.is_published)
            .cloned()
        else {
            return Ok(None);
        };
        let Some(user) = data.user(video.owner) else {
            return Ok(None);
        };

        let owner = VideoOwner {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            subscribers_count: data.subscriber_count(user.id),
            is_subscribed: data.is_subscribed(user.id, viewer),
        };
        let (likes_count, is_liked) = data.like_state(LikeTarget::Video(video.id), viewer);
        Ok(Some(VideoDetails::new(video, owner, likes_count, is_liked)))
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self
            .lock()
            .videos
            .iter()
            .find(|v| v.id == id && v.owner == owner)
            .cloned())
    }

    async fn set_thumbnail(
        &self,
        id: Uuid,
        thumbnail: &MediaAsset,
    ) -> Result<Option<Video>, AppError> {
        let mut data = self.lock();
        Ok(data.videos.iter_mut().find(|v| v.id == id).map(|video| {
            video.thumbnail = thumbnail.clone();
            video.updated_at = Utc::now();
            video.clone()
        }))
    }

    async fn set_published(
        &self,
        id: Uuid,
        is_published: bool,
    ) -> Result<Option<Video>, AppError> {
        let mut data = self.lock();
        Ok(data.videos.iter_mut().find(|v| v.id == id).map(|video| {
            video.is_published = is_published;
            video.updated_at = Utc::now();
            video.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut data = self.lock();
        let before = data.videos.len();
        data.videos.retain(|v| v.id != id);
        Ok(data.videos.len() != before)
    }
}

#[async_trait]
impl CommentStore for InMemoryStore {
    async fn list_for_video(
        &self,
        video: Uuid,
        viewer: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<CommentDetails>, AppError> {
        let data = self.lock();
        let joined: Vec<CommentDetails> = data
            .comments
            .iter()
            .filter(|c| c.video == video)
            .filter_map(|c| {
                let owner = data.user(c.owner)?;
                let (likes_count, is_liked) = data.like_state(LikeTarget::Comment(c.id), viewer);
                Some(CommentDetails {
                    id: c.id,
                    content: c.content.clone(),
                    owner: UserSummary::from(owner),
                    created_at: c.created_at,
                    updated_at: c.updated_at,
                    likes_count,
                    is_liked,
                })
            })
            .collect();
        let total = joined.len() as i64;
        Ok(Paginated::new(page_of(&joined, page), total, page))
    }

    async fn create(&self, content: &str, video: Uuid, owner: Uuid) -> Result<Comment, AppError> {
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            content: content.to_string(),
            video,
            owner,
            created_at: now,
            updated_at: now,
        };
        self.lock().comments.push(comment.clone());
        Ok(comment)
    }

    async fn update_content(&self, id: Uuid, content: &str) -> Result<Option<Comment>, AppError> {
        let mut data = self.lock();
        Ok(data.comments.iter_mut().find(|c| c.id == id).map(|c| {
            c.content = content.to_string();
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Comment>, AppError> {
        let mut data = self.lock();
        let position = data.comments.iter().position(|c| c.id == id);
        Ok(position.map(|i| data.comments.remove(i)))
    }
}

#[async_trait]
impl PlaylistStore for InMemoryStore {
    async fn create(&self, playlist: NewPlaylist) -> Result<Playlist, AppError> {
        let now = Utc::now();
        let playlist = Playlist {
            id: Uuid::new_v4(),
            name: playlist.name,
            description: playlist.description,
            owner: playlist.owner,
            videos: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.lock().playlists.push(playlist.clone());
        Ok(playlist)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Playlist>, AppError> {
        Ok(self
            .lock()
            .playlists
            .iter()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Playlist>, AppError> {
        Ok(self.playlist(id))
    }

    async fn contains_video(&self, id: Uuid, video: Uuid) -> Result<Option<bool>, AppError> {
        Ok(self.playlist(id).map(|p| p.videos.contains(&video)))
    }

    async fn push_video(&self, id: Uuid, video: Uuid) -> Result<Option<Playlist>, AppError> {
        let mut data = self.lock();
        Ok(data.playlists.iter_mut().find(|p| p.id == id).map(|p| {
            p.videos.push(video);
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn pull_video(&self, id: Uuid, video: Uuid) -> Result<Option<Playlist>, AppError> {
        let mut data = self.lock();
        Ok(data.playlists.iter_mut().find(|p| p.id == id).map(|p| {
            p.videos.retain(|v| *v != video);
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Option<Playlist>, AppError> {
        let mut data = self.lock();
        Ok(data.playlists.iter_mut().find(|p| p.id == id).map(|p| {
            p.name = name.to_string();
            p.description = Some(description.to_string());
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Playlist>, AppError> {
        let mut data = self.lock();
        let position = data.playlists.iter().position(|p| p.id == id);
        Ok(position.map(|i| data.playlists.remove(i)))
    }
}

#[async_trait]
impl LikeStore for InMemoryStore {
    async fn find(&self, target: LikeTarget, liked_by: Uuid) -> Result<Option<Like>, AppError> {
        Ok(self
            .lock()
            .likes
            .iter()
            .find(|l| l.targets(&target) && l.liked_by == liked_by)
            .cloned())
    }

    async fn create(&self, target: LikeTarget, liked_by: Uuid) -> Result<Like, AppError> {
        Ok(self.add_like(target, liked_by))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut data = self.lock();
        let before = data.likes.len();
        data.likes.retain(|l| l.id != id);
        Ok(data.likes.len() != before)
    }

    async fn liked_videos(&self, user: Uuid) -> Result<Vec<Video>, AppError> {
        let data = self.lock();
        let mut seen = Vec::new();
        for like in data.likes.iter().rev().filter(|l| l.liked_by == user) {
            if let Some(id) = like.video {
                if !seen.contains(&id) {
                    seen.push(id);
                }
            }
        }
        Ok(seen
            .into_iter()
            .filter_map(|id| data.videos.iter().find(|v| v.id == id).cloned())
            .collect())
    }
}
