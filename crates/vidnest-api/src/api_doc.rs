//! OpenAPI documentation, served at `/api/openapi.json` and rendered by
//! RapiDoc at `/docs`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::constants::ACCESS_TOKEN_COOKIE;
use crate::error::ErrorResponse;
use crate::handlers;
use crate::handlers::health::HealthStatus;
use crate::response::EmptyData;
use vidnest_core::models::{
    ChannelSummary, Comment, CommentDetails, CreateCommentRequest, CreatePlaylistRequest,
    LikeStatus, MediaAsset, Playlist, PublishStatus, UpdateCommentRequest, UpdatePlaylistRequest,
    UserSummary, Video, VideoDetails, VideoListItem, VideoOwner,
};

struct SessionAuth;

impl Modify for SessionAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(ACCESS_TOKEN_COOKIE))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vidnest API",
        version = "0.1.0",
        description = "Video hosting backend: videos, comments, playlists and likes. All resource endpoints live under /api/v1/ and require a session token."
    ),
    paths(
        // Videos
        handlers::videos::publish_video,
        handlers::videos::list_videos,
        handlers::videos::get_video_by_id,
        handlers::videos::delete_video,
        handlers::videos::update_thumbnail,
        handlers::videos::toggle_publish_status,
        // Comments
        handlers::comments::get_video_comments,
        handlers::comments::add_comment,
        handlers::comments::update_comment,
        handlers::comments::delete_comment,
        // Playlists
        handlers::playlists::create_playlist,
        handlers::playlists::get_user_playlists,
        handlers::playlists::get_playlist_by_id,
        handlers::playlists::add_video_to_playlist,
        handlers::playlists::remove_video_from_playlist,
        handlers::playlists::update_playlist,
        handlers::playlists::delete_playlist,
        // Likes
        handlers::likes::toggle_video_like,
        handlers::likes::toggle_comment_like,
        handlers::likes::toggle_tweet_like,
        handlers::likes::get_liked_videos,
        // Health
        handlers::health::health_check,
    ),
    components(schemas(
        ErrorResponse,
        EmptyData,
        HealthStatus,
        MediaAsset,
        UserSummary,
        ChannelSummary,
        VideoOwner,
        Video,
        VideoListItem,
        VideoDetails,
        PublishStatus,
        Comment,
        CommentDetails,
        CreateCommentRequest,
        UpdateCommentRequest,
        Playlist,
        CreatePlaylistRequest,
        UpdatePlaylistRequest,
        LikeStatus,
    )),
    modifiers(&SessionAuth),
    security(("bearer" = []), ("cookie" = [])),
    tags(
        (name = "videos", description = "Publishing, browsing and managing videos"),
        (name = "comments", description = "Comments on videos"),
        (name = "playlists", description = "User playlists"),
        (name = "likes", description = "Likes on videos, comments and tweets"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
