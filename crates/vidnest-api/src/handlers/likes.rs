//! Like toggles for videos, comments and tweets, plus the caller's liked
//! videos.

use std::sync::Arc;

use axum::extract::{Path, State};
use uuid::Uuid;
use vidnest_core::models::{LikeStatus, LikeTarget, Video};
use vidnest_core::validation::parse_object_id;

use crate::auth::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Remove the caller's like on `target` if there is one, otherwise add it.
///
/// Find and write are separate calls; two concurrent toggles can both insert.
async fn toggle(
    state: &AppState,
    target: LikeTarget,
    liked_by: Uuid,
) -> Result<ApiResponse<LikeStatus>, HttpAppError> {
    let is_liked = match state.db.likes.find(target, liked_by).await? {
        Some(existing) => {
            state.db.likes.delete(existing.id).await?;
            false
        }
        None => {
            state.db.likes.create(target, liked_by).await?;
            true
        }
    };

    tracing::debug!(?target, is_liked, "Like toggled");
    Ok(ApiResponse::ok(
        LikeStatus { is_liked },
        "Like toggled successfully",
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/likes/toggle/v/{videoId}",
    tag = "likes",
    params(("videoId" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "New like state", body = ApiResponse<LikeStatus>),
        (status = 400, description = "Invalid id", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id(), operation = "toggle_video_like"))]
pub async fn toggle_video_like(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<LikeStatus>, HttpAppError> {
    let video_id = parse_object_id(&video_id, "Invalid video Id")?;
    toggle(&state, LikeTarget::Video(video_id), user.id()).await
}

#[utoipa::path(
    post,
    path = "/api/v1/likes/toggle/c/{commentId}",
    tag = "likes",
    params(("commentId" = String, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "New like state", body = ApiResponse<LikeStatus>),
        (status = 400, description = "Invalid id", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id(), operation = "toggle_comment_like"))]
pub async fn toggle_comment_like(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(comment_id): Path<String>,
) -> Result<ApiResponse<LikeStatus>, HttpAppError> {
    let comment_id = parse_object_id(&comment_id, "Invalid comment Id")?;
    toggle(&state, LikeTarget::Comment(comment_id), user.id()).await
}

#[utoipa::path(
    post,
    path = "/api/v1/likes/toggle/t/{tweetId}",
    tag = "likes",
    params(("tweetId" = String, Path, description = "Tweet ID")),
    responses(
        (status = 200, description = "New like state", body = ApiResponse<LikeStatus>),
        (status = 400, description = "Invalid id", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id(), operation = "toggle_tweet_like"))]
pub async fn toggle_tweet_like(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(tweet_id): Path<String>,
) -> Result<ApiResponse<LikeStatus>, HttpAppError> {
    let tweet_id = parse_object_id(&tweet_id, "Invalid tweet Id")?;
    toggle(&state, LikeTarget::Tweet(tweet_id), user.id()).await
}

#[utoipa::path(
    get,
    path = "/api/v1/likes/videos",
    tag = "likes",
    responses(
        (status = 200, description = "Videos liked by the caller, most recent like first", body = ApiResponse<Vec<Video>>)
    )
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id(), operation = "liked_videos"))]
pub async fn get_liked_videos(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<ApiResponse<Vec<Video>>, HttpAppError> {
    let videos = state.db.likes.liked_videos(user.id()).await?;
    Ok(ApiResponse::ok(videos, "Liked videos fetched successfully"))
}
