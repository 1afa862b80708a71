//! Resource route groups (videos, comments, playlists, likes).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, patch, post};
use axum::Router;
use std::sync::Arc;

pub fn video_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/videos", API_PREFIX),
            get(handlers::videos::list_videos).post(handlers::videos::publish_video),
        )
        .route(
            &format!("{}/videos/{{videoId}}", API_PREFIX),
            get(handlers::videos::get_video_by_id)
                .delete(handlers::videos::delete_video)
                .patch(handlers::videos::update_thumbnail),
        )
        .route(
            &format!("{}/videos/toggle/publish/{{videoId}}", API_PREFIX),
            patch(handlers::videos::toggle_publish_status),
        )
        .with_state(state)
}

pub fn comment_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/comments/{{videoId}}", API_PREFIX),
            get(handlers::comments::get_video_comments).post(handlers::comments::add_comment),
        )
        .route(
            &format!("{}/comments/c/{{commentId}}", API_PREFIX),
            patch(handlers::comments::update_comment).delete(handlers::comments::delete_comment),
        )
        .with_state(state)
}

pub fn playlist_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/playlist", API_PREFIX),
            post(handlers::playlists::create_playlist),
        )
        .route(
            &format!("{}/playlist/user/{{userId}}", API_PREFIX),
            get(handlers::playlists::get_user_playlists),
        )
        .route(
            &format!("{}/playlist/{{playlistId}}", API_PREFIX),
            get(handlers::playlists::get_playlist_by_id)
                .patch(handlers::playlists::update_playlist)
                .delete(handlers::playlists::delete_playlist),
        )
        .route(
            &format!("{}/playlist/add/{{videoId}}/{{playlistId}}", API_PREFIX),
            patch(handlers::playlists::add_video_to_playlist),
        )
        .route(
            &format!("{}/playlist/remove/{{videoId}}/{{playlistId}}", API_PREFIX),
            patch(handlers::playlists::remove_video_from_playlist),
        )
        .with_state(state)
}

pub fn like_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/likes/toggle/v/{{videoId}}", API_PREFIX),
            post(handlers::likes::toggle_video_like),
        )
        .route(
            &format!("{}/likes/toggle/c/{{commentId}}", API_PREFIX),
            post(handlers::likes::toggle_comment_like),
        )
        .route(
            &format!("{}/likes/toggle/t/{{tweetId}}", API_PREFIX),
            post(handlers::likes::toggle_tweet_like),
        )
        .route(
            &format!("{}/likes/videos", API_PREFIX),
            get(handlers::likes::get_liked_videos),
        )
        .with_state(state)
}
