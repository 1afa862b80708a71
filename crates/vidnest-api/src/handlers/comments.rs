//! Comment handlers: paginated listing per video, post, edit and delete.
//!
//! Listing needs no existing video; an unknown id just yields an empty page.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use validator::Validate;
use vidnest_core::constants::DB_OPERATION_FAILED;
use vidnest_core::models::{
    Comment, CommentDetails, CreateCommentRequest, PageQuery, Paginated, UpdateCommentRequest,
};
use vidnest_core::validation::parse_object_id;
use vidnest_core::AppError;

use crate::auth::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::response::{ApiResponse, EmptyData};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/comments/{videoId}",
    tag = "comments",
    params(("videoId" = String, Path, description = "Video ID"), PageQuery),
    responses(
        (status = 200, description = "Comments of the video, oldest first", body = ApiResponse<Paginated<CommentDetails>>),
        (status = 400, description = "Invalid id", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, user, params), fields(user_id = %user.id(), operation = "list_comments"))]
pub async fn get_video_comments(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(video_id): Path<String>,
    Query(params): Query<PageQuery>,
) -> Result<ApiResponse<Paginated<CommentDetails>>, HttpAppError> {
    let video_id = parse_object_id(&video_id, "Invalid video Id")?;

    let comments = state
        .db
        .comments
        .list_for_video(video_id, user.id(), params.to_request())
        .await?;

    Ok(ApiResponse::ok(comments, "Comment Fetched Successfully"))
}

#[utoipa::path(
    post,
    path = "/api/v1/comments/{videoId}",
    tag = "comments",
    params(("videoId" = String, Path, description = "Video ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment created", body = ApiResponse<Comment>),
        (status = 400, description = "Invalid id or missing content", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, user, body), fields(user_id = %user.id(), operation = "add_comment"))]
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(video_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CreateCommentRequest>,
) -> Result<ApiResponse<Comment>, HttpAppError> {
    let video_id = parse_object_id(&video_id, "Invalid video Id")?;
    body.validate()?;
    let content = body.content.unwrap_or_default();

    let comment = state
        .db
        .comments
        .create(&content, video_id, user.id())
        .await?;

    Ok(ApiResponse::ok(comment, "comment posted successfully"))
}

#[utoipa::path(
    patch,
    path = "/api/v1/comments/c/{commentId}",
    tag = "comments",
    params(("commentId" = String, Path, description = "Comment ID")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = ApiResponse<Comment>),
        (status = 400, description = "Invalid id, missing content, or unknown comment", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _user, body), fields(operation = "update_comment"))]
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(comment_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateCommentRequest>,
) -> Result<ApiResponse<Comment>, HttpAppError> {
    let comment_id = parse_object_id(&comment_id, "Invalid comment Id")?;
    body.validate()?;
    let content = body.content.unwrap_or_default();

    // Any authenticated user may edit any comment.
    let comment = state
        .db
        .comments
        .update_content(comment_id, &content)
        .await?
        .ok_or_else(|| AppError::bad_request(DB_OPERATION_FAILED))?;

    Ok(ApiResponse::ok(comment, "comment updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/comments/c/{commentId}",
    tag = "comments",
    params(("commentId" = String, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted", body = ApiResponse<EmptyData>),
        (status = 400, description = "Invalid id or unknown comment", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _user), fields(operation = "delete_comment"))]
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(comment_id): Path<String>,
) -> Result<ApiResponse<EmptyData>, HttpAppError> {
    let comment_id = parse_object_id(&comment_id, "Invalid comment Id")?;

    state
        .db
        .comments
        .delete(comment_id)
        .await?
        .ok_or_else(|| AppError::bad_request(DB_OPERATION_FAILED))?;

    Ok(ApiResponse::ok(EmptyData::default(), "comment deleted successfully"))
}
