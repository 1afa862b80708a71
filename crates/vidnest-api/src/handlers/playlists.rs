//! Playlist handlers
//!
//! A playlist's `videos` behaves like an ordered set: adding checks for the
//! id first, removing is an idempotent pull. The check and the push are two
//! separate store calls.

use std::sync::Arc;

use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;
use vidnest_core::constants::DB_OPERATION_FAILED;
use vidnest_core::models::{CreatePlaylistRequest, NewPlaylist, Playlist, UpdatePlaylistRequest};
use vidnest_core::validation::parse_object_id;
use vidnest_core::AppError;

use crate::auth::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::response::{ApiResponse, EmptyData};
use crate::state::AppState;

const INVALID_PLAYLIST_ID: &str = "Invalid Playlist ID";
const INVALID_VIDEO_ID: &str = "Invalid Video ID";

/// Playlist id first, then video id.
fn parse_pair(video_id: &str, playlist_id: &str) -> Result<(Uuid, Uuid), AppError> {
    let playlist_id = parse_object_id(playlist_id, INVALID_PLAYLIST_ID)?;
    let video_id = parse_object_id(video_id, INVALID_VIDEO_ID)?;
    Ok((video_id, playlist_id))
}

#[utoipa::path(
    post,
    path = "/api/v1/playlist",
    tag = "playlists",
    request_body = CreatePlaylistRequest,
    responses(
        (status = 200, description = "Playlist created", body = ApiResponse<Playlist>),
        (status = 400, description = "Missing name", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, user, body), fields(user_id = %user.id(), operation = "create_playlist"))]
pub async fn create_playlist(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ValidatedJson(body): ValidatedJson<CreatePlaylistRequest>,
) -> Result<ApiResponse<Playlist>, HttpAppError> {
    body.validate()?;

    let playlist = state
        .db
        .playlists
        .create(NewPlaylist {
            name: body.name.unwrap_or_default(),
            description: body.description,
            owner: user.id(),
        })
        .await?;

    Ok(ApiResponse::ok(playlist, "Playlist created successfully"))
}

#[utoipa::path(
    get,
    path = "/api/v1/playlist/user/{userId}",
    tag = "playlists",
    params(("userId" = String, Path, description = "Owner's user ID")),
    responses(
        (status = 200, description = "Playlists owned by the user", body = ApiResponse<Vec<Playlist>>),
        (status = 400, description = "Invalid id, or the user has no playlists", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _user), fields(operation = "list_user_playlists"))]
pub async fn get_user_playlists(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<Playlist>>, HttpAppError> {
    let user_id = parse_object_id(&user_id, "Invalid User ID")?;

    let playlists = state.db.playlists.list_by_owner(user_id).await?;
    if playlists.is_empty() {
        return Err(AppError::bad_request("No playlist available").into());
    }

    Ok(ApiResponse::ok(playlists, "Playlist fetched successfully"))
}

#[utoipa::path(
    get,
    path = "/api/v1/playlist/{playlistId}",
    tag = "playlists",
    params(("playlistId" = String, Path, description = "Playlist ID")),
    responses(
        (status = 200, description = "Playlist", body = ApiResponse<Playlist>),
        (status = 400, description = "Invalid or unknown id", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _user), fields(operation = "get_playlist"))]
pub async fn get_playlist_by_id(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(playlist_id): Path<String>,
) -> Result<ApiResponse<Playlist>, HttpAppError> {
    let playlist_id = parse_object_id(&playlist_id, INVALID_PLAYLIST_ID)?;

    let playlist = state
        .db
        .playlists
        .find_by_id(playlist_id)
        .await?
        .ok_or_else(|| AppError::bad_request("Invalid Playlist Id"))?;

    Ok(ApiResponse::ok(playlist, "Playlist fetched successfully"))
}

#[utoipa::path(
    patch,
    path = "/api/v1/playlist/add/{videoId}/{playlistId}",
    tag = "playlists",
    params(
        ("videoId" = String, Path, description = "Video ID"),
        ("playlistId" = String, Path, description = "Playlist ID")
    ),
    responses(
        (status = 200, description = "Video appended", body = ApiResponse<Playlist>),
        (status = 400, description = "Invalid ids, duplicate video, or unknown playlist", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _user), fields(operation = "add_video_to_playlist"))]
pub async fn add_video_to_playlist(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path((video_id, playlist_id)): Path<(String, String)>,
) -> Result<ApiResponse<Playlist>, HttpAppError> {
    let (video_id, playlist_id) = parse_pair(&video_id, &playlist_id)?;

    let already_there = state
        .db
        .playlists
        .contains_video(playlist_id, video_id)
        .await?
        .ok_or_else(|| AppError::bad_request(DB_OPERATION_FAILED))?;
    if already_there {
        return Err(AppError::bad_request("Video already exist in playlist").into());
    }

    let playlist = state
        .db
        .playlists
        .push_video(playlist_id, video_id)
        .await?
        .ok_or_else(|| AppError::bad_request(DB_OPERATION_FAILED))?;

    Ok(ApiResponse::ok(playlist, "video added to playlist"))
}

#[utoipa::path(
    patch,
    path = "/api/v1/playlist/remove/{videoId}/{playlistId}",
    tag = "playlists",
    params(
        ("videoId" = String, Path, description = "Video ID"),
        ("playlistId" = String, Path, description = "Playlist ID")
    ),
    responses(
        (status = 200, description = "Video removed (or was not present)", body = ApiResponse<Playlist>),
        (status = 400, description = "Invalid ids or unknown playlist", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _user), fields(operation = "remove_video_from_playlist"))]
pub async fn remove_video_from_playlist(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path((video_id, playlist_id)): Path<(String, String)>,
) -> Result<ApiResponse<Playlist>, HttpAppError> {
    let (video_id, playlist_id) = parse_pair(&video_id, &playlist_id)?;

    let playlist = state
        .db
        .playlists
        .pull_video(playlist_id, video_id)
        .await?
        .ok_or_else(|| AppError::bad_request(DB_OPERATION_FAILED))?;

    Ok(ApiResponse::ok(playlist, "video removed from playlist"))
}

#[utoipa::path(
    patch,
    path = "/api/v1/playlist/{playlistId}",
    tag = "playlists",
    params(("playlistId" = String, Path, description = "Playlist ID")),
    request_body = UpdatePlaylistRequest,
    responses(
        (status = 200, description = "Playlist updated", body = ApiResponse<EmptyData>),
        (status = 400, description = "Invalid id, missing field, or unknown playlist", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _user, body), fields(operation = "update_playlist"))]
pub async fn update_playlist(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(playlist_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdatePlaylistRequest>,
) -> Result<ApiResponse<EmptyData>, HttpAppError> {
    let playlist_id = parse_object_id(&playlist_id, INVALID_PLAYLIST_ID)?;
    body.validate()?;

    let name = body.name.unwrap_or_default();
    let description = body.description.unwrap_or_default();
    state
        .db
        .playlists
        .update(playlist_id, &name, &description)
        .await?
        .ok_or_else(|| AppError::bad_request(DB_OPERATION_FAILED))?;

    Ok(ApiResponse::ok(EmptyData::default(), "Playlist updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/playlist/{playlistId}",
    tag = "playlists",
    params(("playlistId" = String, Path, description = "Playlist ID")),
    responses(
        (status = 200, description = "Playlist deleted", body = ApiResponse<EmptyData>),
        (status = 400, description = "Invalid or unknown id", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _user), fields(operation = "delete_playlist"))]
pub async fn delete_playlist(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(playlist_id): Path<String>,
) -> Result<ApiResponse<EmptyData>, HttpAppError> {
    let playlist_id = parse_object_id(&playlist_id, INVALID_PLAYLIST_ID)?;

    state
        .db
        .playlists
        .delete(playlist_id)
        .await?
        .ok_or_else(|| AppError::bad_request("Invalid Play List Id"))?;

    Ok(ApiResponse::ok(EmptyData::default(), "Playlist deleted successfully"))
}
