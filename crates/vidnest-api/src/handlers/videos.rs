//! Video handlers: publish, feed, watch, thumbnail replacement, publish
//! toggle and delete.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;
use vidnest_core::models::{
    NewVideo, PageQuery, PageRequest, Paginated, PublishStatus, PublishVideoFields, Video,
    VideoDetails, VideoListItem,
};
use vidnest_core::validation::parse_object_id;
use vidnest_core::AppError;
use vidnest_storage::AssetKind;

use crate::auth::CurrentUser;
use crate::constants::{THUMBNAIL_FIELD, VIDEO_FILE_FIELD};
use crate::error::{ErrorResponse, HttpAppError};
use crate::response::{ApiResponse, EmptyData};
use crate::state::AppState;
use crate::utils::upload::{read_upload_form, UploadLimits};

/// Feed query. Only `page` and `limit` affect the result; the search and
/// sort parameters are accepted for client compatibility.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ListVideosQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub sort_type: Option<String>,
    pub user_id: Option<String>,
}

impl ListVideosQuery {
    fn page_request(&self) -> PageRequest {
        PageQuery {
            page: self.page.clone(),
            limit: self.limit.clone(),
        }
        .to_request()
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/videos",
    tag = "videos",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "Text fields `title`, `description`; files `videoFile`, `thumbnail`"
    ),
    responses(
        (status = 200, description = "Video published", body = ApiResponse<Video>),
        (status = 400, description = "Missing field or failed upload", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Duration probe or store failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, user, multipart), fields(user_id = %user.id(), operation = "publish_video"))]
pub async fn publish_video(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<ApiResponse<Video>, HttpAppError> {
    let limits = UploadLimits::new(state.media.max_image_size)
        .with_field(VIDEO_FILE_FIELD, state.media.max_video_size)
        .with_field(THUMBNAIL_FIELD, state.media.max_image_size);
    let form = read_upload_form(multipart, &limits).await?;

    let fields = PublishVideoFields {
        title: form.text("title").map(str::to_string),
        description: form.text("description").map(str::to_string),
    };
    fields.validate()?;

    // Sequential, and an uploaded video is kept if the thumbnail then fails.
    let host = &state.media.host;
    let video_asset = host.upload(AssetKind::Video, form.file(VIDEO_FILE_FIELD)).await;
    let thumbnail_asset = host.upload(AssetKind::Image, form.file(THUMBNAIL_FIELD)).await;

    let video_asset = video_asset.ok_or_else(|| AppError::bad_request("Video file is required"))?;
    let thumbnail_asset =
        thumbnail_asset.ok_or_else(|| AppError::bad_request("Thumbnail file is required"))?;

    let duration = state.media.probe.duration_seconds(&video_asset.url).await?;

    let video = state
        .db
        .videos
        .create(NewVideo {
            video: video_asset,
            thumbnail: thumbnail_asset,
            title: fields.title.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
            duration,
            owner: user.id(),
        })
        .await?;

    tracing::info!(video_id = %video.id, duration, "Video published");
    Ok(ApiResponse::ok(video, "Video published successfully"))
}

#[utoipa::path(
    get,
    path = "/api/v1/videos",
    tag = "videos",
    params(ListVideosQuery),
    responses(
        (status = 200, description = "One page of the feed", body = ApiResponse<Paginated<VideoListItem>>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, _user, params),
    fields(
        page = ?params.page,
        limit = ?params.limit,
        query = ?params.query,
        sort_by = ?params.sort_by,
        sort_type = ?params.sort_type,
        owner_filter = ?params.user_id,
        operation = "list_videos"
    )
)]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(params): Query<ListVideosQuery>,
) -> Result<ApiResponse<Paginated<VideoListItem>>, HttpAppError> {
    let page = state.db.videos.list_with_owners(params.page_request()).await?;
    Ok(ApiResponse::ok(page, "All video fetch successful"))
}

#[utoipa::path(
    get,
    path = "/api/v1/videos/{videoId}",
    tag = "videos",
    params(("videoId" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video with owner and like state; `data` is null when the video is missing or unpublished", body = ApiResponse<VideoDetails>),
        (status = 400, description = "Invalid id", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id(), operation = "get_video"))]
pub async fn get_video_by_id(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<Option<VideoDetails>>, HttpAppError> {
    let video_id = parse_object_id(&video_id, "Invalid Video Id")?;

    state.db.videos.increment_views(video_id).await?;

    let video = state
        .db
        .videos
        .find_published_details(video_id, user.id())
        .await?;

    if !state.db.users.has_watched(user.id(), video_id).await? {
        state.db.users.push_watch_history(user.id(), video_id).await?;
    }

    Ok(ApiResponse::ok(video, "Video fetched successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/videos/{videoId}",
    tag = "videos",
    params(("videoId" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video and its assets deleted", body = ApiResponse<EmptyData>),
        (status = 400, description = "Invalid id", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id(), operation = "delete_video"))]
pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<EmptyData>, HttpAppError> {
    let video_id = parse_object_id(&video_id, "Invalid video Id")?;

    let video = state.db.videos.find_owned(video_id, user.id()).await?;

    // Without a match the host calls carry no id and nothing is removed.
    let media_id = video.as_ref().map(|v| v.video.public_id.as_str());
    let thumbnail_id = video.as_ref().map(|v| v.thumbnail.public_id.as_str());
    state.media.host.delete_video_asset(media_id).await;
    state.media.host.delete_image_asset(thumbnail_id).await;

    match video {
        Some(video) => {
            state.db.videos.delete(video.id).await?;
            tracing::info!(video_id = %video.id, "Video deleted");
        }
        None => tracing::debug!(video_id = %video_id, "No owned video to delete"),
    }

    Ok(ApiResponse::ok(EmptyData::default(), "video deleted successfully"))
}

#[utoipa::path(
    patch,
    path = "/api/v1/videos/{videoId}",
    tag = "videos",
    params(("videoId" = String, Path, description = "Video ID")),
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "File `thumbnail`"
    ),
    responses(
        (status = 200, description = "Thumbnail replaced", body = ApiResponse<Video>),
        (status = 400, description = "Invalid id, unknown video, or failed upload", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, user, multipart), fields(user_id = %user.id(), operation = "update_thumbnail"))]
pub async fn update_thumbnail(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(video_id): Path<String>,
    multipart: Multipart,
) -> Result<ApiResponse<Video>, HttpAppError> {
    let video_id = parse_object_id(&video_id, "Video id not available")?;

    let video = state
        .db
        .videos
        .find_owned(video_id, user.id())
        .await?
        .ok_or_else(|| AppError::bad_request("Video not available"))?;

    state
        .media
        .host
        .delete_image_asset(Some(&video.thumbnail.public_id))
        .await;

    let limits = UploadLimits::new(state.media.max_image_size);
    let form = read_upload_form(multipart, &limits).await?;
    let file = form
        .file(THUMBNAIL_FIELD)
        .ok_or_else(|| AppError::bad_request("Thumbnail file is missing"))?;

    let thumbnail = state
        .media
        .host
        .upload(AssetKind::Image, Some(file))
        .await
        .ok_or_else(|| AppError::bad_request("Error while uploading on thumbnail"))?;

    let updated = state
        .db
        .videos
        .set_thumbnail(video.id, &thumbnail)
        .await?
        .ok_or_else(|| AppError::bad_request("Video not available"))?;

    Ok(ApiResponse::ok(updated, "Thumbnail changed successful"))
}

#[utoipa::path(
    patch,
    path = "/api/v1/videos/toggle/publish/{videoId}",
    tag = "videos",
    params(("videoId" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Publish flag flipped", body = ApiResponse<PublishStatus>),
        (status = 400, description = "Invalid id or unknown video", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id(), operation = "toggle_publish"))]
pub async fn toggle_publish_status(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<PublishStatus>, HttpAppError> {
    let video_id = parse_object_id(&video_id, "Video id not available")?;

    let video = state
        .db
        .videos
        .find_owned(video_id, user.id())
        .await?
        .ok_or_else(|| AppError::bad_request("Video not available"))?;

    let updated = state
        .db
        .videos
        .set_published(video.id, !video.is_published)
        .await?
        .ok_or_else(|| AppError::bad_request("Video not available"))?;

    Ok(ApiResponse::ok(
        PublishStatus {
            is_published: updated.is_published,
        },
        "Publish status toggled successfully",
    ))
}
