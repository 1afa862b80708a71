//! Video API integration tests.
//!
//! Run with: `cargo test -p vidnest-api --test videos_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::{api_path, bearer, publish_video, setup_test_app, thumbnail_part, video_part};
use serde_json::Value;
use uuid::Uuid;
use vidnest_core::models::LikeTarget;

#[tokio::test]
async fn test_publish_video_stores_assets_and_duration() {
    let app = setup_test_app();
    let user = app.register_user("alice");

    let response = app
        .client()
        .post(&api_path("/videos"))
        .add_header("Authorization", bearer(&user.token))
        .multipart(helpers::publish_form("First clip", "My first upload"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Video published successfully");

    let video = &body["data"];
    assert_eq!(video["title"], "First clip");
    assert_eq!(video["views"], 0);
    assert_eq!(video["isPublished"], true);
    assert_eq!(video["duration"], helpers::TEST_DURATION_SECS);
    assert_eq!(video["owner"], user.user.id.to_string());

    let video_key = video["video"]["public_id"].as_str().unwrap();
    let thumb_key = video["thumbnail"]["public_id"].as_str().unwrap();
    assert!(video_key.starts_with("videos/"));
    assert!(thumb_key.starts_with("images/"));
    assert!(app.storage.has_file(video_key));
    assert!(app.storage.has_file(thumb_key));
    assert_eq!(app.store.video_count(), 1);
}

#[tokio::test]
async fn test_publish_requires_text_fields() {
    let app = setup_test_app();
    let user = app.register_user("alice");

    let form = MultipartForm::new()
        .add_text("title", "")
        .add_text("description", "has a description")
        .add_part("videoFile", video_part())
        .add_part("thumbnail", thumbnail_part());

    let response = app
        .client()
        .post(&api_path("/videos"))
        .add_header("Authorization", bearer(&user.token))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "All fields are required");
    assert_eq!(body["success"], false);
    assert_eq!(app.storage.file_count(), 0);
}

#[tokio::test]
async fn test_publish_without_thumbnail_keeps_uploaded_video() {
    let app = setup_test_app();
    let user = app.register_user("alice");

    let form = MultipartForm::new()
        .add_text("title", "No thumb")
        .add_text("description", "missing thumbnail")
        .add_part("videoFile", video_part());

    let response = app
        .client()
        .post(&api_path("/videos"))
        .add_header("Authorization", bearer(&user.token))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Thumbnail file is required");
    // The video upload is not rolled back
    assert_eq!(app.storage.file_count(), 1);
    assert_eq!(app.store.video_count(), 0);
}

#[tokio::test]
async fn test_publish_fails_when_media_host_rejects_video() {
    let app = setup_test_app();
    let user = app.register_user("alice");
    app.storage.fail_uploads_under("videos/");

    let response = app
        .client()
        .post(&api_path("/videos"))
        .add_header("Authorization", bearer(&user.token))
        .multipart(helpers::publish_form("t", "d"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Video file is required");
    assert_eq!(app.store.video_count(), 0);
}

#[tokio::test]
async fn test_get_video_counts_views_and_records_history_once() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let viewer = app.register_user("viewer");
    app.store.add_subscription(viewer.user.id, owner.user.id);
    let video_id = publish_video(&app, &owner, "Watch me").await;

    for expected_views in 1..=2 {
        let response = app
            .client()
            .get(&api_path(&format!("/videos/{}", video_id)))
            .add_header("Authorization", bearer(&viewer.token))
            .await;
        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        let data = &body["data"];
        assert_eq!(data["views"], expected_views);
        assert_eq!(data["likesCount"], 0);
        assert_eq!(data["isLiked"], false);
        assert_eq!(data["owner"]["username"], "owner");
        assert_eq!(data["owner"]["subscribersCount"], 1);
        assert_eq!(data["owner"]["isSubscribed"], true);
    }

    let id = Uuid::parse_str(&video_id).unwrap();
    let history = app.store.user(viewer.user.id).unwrap().watch_history;
    assert_eq!(history, vec![id]);
}

#[tokio::test]
async fn test_get_video_reflects_likes_for_viewer() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let viewer = app.register_user("viewer");
    let video_id = publish_video(&app, &owner, "Liked").await;
    let id = Uuid::parse_str(&video_id).unwrap();
    app.store.add_like(LikeTarget::Video(id), owner.user.id);
    app.store.add_like(LikeTarget::Video(id), viewer.user.id);

    let response = app
        .client()
        .get(&api_path(&format!("/videos/{}", video_id)))
        .add_header("Authorization", bearer(&owner.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"]["likesCount"], 2);
    assert_eq!(body["data"]["isLiked"], true);
    assert_eq!(body["data"]["owner"]["isSubscribed"], false);
}

#[tokio::test]
async fn test_get_unknown_video_returns_null_data() {
    let app = setup_test_app();
    let user = app.register_user("alice");

    let response = app
        .client()
        .get(&api_path(&format!("/videos/{}", Uuid::new_v4())))
        .add_header("Authorization", bearer(&user.token))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["data"].is_null());
    assert_eq!(body["message"], "Video fetched successfully");
}

#[tokio::test]
async fn test_get_video_rejects_malformed_id() {
    let app = setup_test_app();
    let user = app.register_user("alice");

    let response = app
        .client()
        .get(&api_path("/videos/not-an-id"))
        .add_header("Authorization", bearer(&user.token))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid Video Id");
}

#[tokio::test]
async fn test_unpublished_video_is_hidden() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let video_id = publish_video(&app, &owner, "Draft").await;

    let response = app
        .client()
        .patch(&api_path(&format!("/videos/toggle/publish/{}", video_id)))
        .add_header("Authorization", bearer(&owner.token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["data"]["isPublished"], false);
    assert_eq!(body["message"], "Publish status toggled successfully");

    let response = app
        .client()
        .get(&api_path(&format!("/videos/{}", video_id)))
        .add_header("Authorization", bearer(&owner.token))
        .await;
    let body: Value = response.json();
    assert!(body["data"].is_null());

    // Views still count on the stored document
    let id = Uuid::parse_str(&video_id).unwrap();
    assert_eq!(app.store.video(id).unwrap().views, 1);
}

#[tokio::test]
async fn test_toggle_publish_requires_ownership() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let other = app.register_user("other");
    let video_id = publish_video(&app, &owner, "Mine").await;

    let response = app
        .client()
        .patch(&api_path(&format!("/videos/toggle/publish/{}", video_id)))
        .add_header("Authorization", bearer(&other.token))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Video not available");
}

#[tokio::test]
async fn test_list_videos_paginates_with_owner_channel() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    for i in 0..3 {
        publish_video(&app, &owner, &format!("clip {}", i)).await;
    }

    let response = app
        .client()
        .get(&api_path("/videos"))
        .add_query_param("page", 2)
        .add_query_param("limit", 2)
        .add_query_param("sortBy", "views")
        .add_header("Authorization", bearer(&owner.token))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "All video fetch successful");
    let page = &body["data"];
    assert_eq!(page["totalDocs"], 3);
    assert_eq!(page["page"], 2);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["hasNextPage"], false);
    assert_eq!(page["hasPrevPage"], true);
    let docs = page["docs"].as_array().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["title"], "clip 2");
    assert_eq!(docs[0]["owner"][0]["username"], "owner");
}

#[tokio::test]
async fn test_delete_video_removes_document_and_assets() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let video_id = publish_video(&app, &owner, "Doomed").await;
    assert_eq!(app.storage.file_count(), 2);

    let response = app
        .client()
        .delete(&api_path(&format!("/videos/{}", video_id)))
        .add_header("Authorization", bearer(&owner.token))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "video deleted successfully");
    assert_eq!(app.store.video_count(), 0);
    assert_eq!(app.storage.file_count(), 0);
}

#[tokio::test]
async fn test_generic_content_type_video_is_stored_and_deleted_as_video() {
    let app = setup_test_app();
    let owner = app.register_user("owner");

    let untyped = axum_test::multipart::Part::bytes(b"\x00\x00\x00\x18ftypmp42".to_vec())
        .file_name("clip.mp4")
        .mime_type("application/octet-stream");
    let form = MultipartForm::new()
        .add_text("title", "Untyped")
        .add_text("description", "no video mime")
        .add_part(vidnest_api::constants::VIDEO_FILE_FIELD, untyped)
        .add_part(vidnest_api::constants::THUMBNAIL_FIELD, thumbnail_part());
    let response = app
        .client()
        .post(&api_path("/videos"))
        .add_header("Authorization", bearer(&owner.token))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let video_id = body["data"]["_id"].as_str().unwrap().to_string();
    assert!(body["data"]["video"]["public_id"]
        .as_str()
        .unwrap()
        .starts_with("videos/"));

    let response = app
        .client()
        .delete(&api_path(&format!("/videos/{}", video_id)))
        .add_header("Authorization", bearer(&owner.token))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(app.storage.file_count(), 0);
}

#[tokio::test]
async fn test_list_videos_with_huge_page_and_limit() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    publish_video(&app, &owner, "only").await;

    let response = app
        .client()
        .get(&api_path("/videos"))
        .add_query_param("page", u32::MAX)
        .add_query_param("limit", u32::MAX)
        .add_header("Authorization", bearer(&owner.token))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let page = &body["data"];
    assert_eq!(page["totalDocs"], 1);
    assert_eq!(page["limit"], vidnest_core::constants::MAX_LIMIT);
    assert_eq!(page["page"], u32::MAX);
    assert!(page["docs"].as_array().unwrap().is_empty());
    assert_eq!(page["hasNextPage"], false);
}

#[tokio::test]
async fn test_delete_video_of_other_user_is_a_noop() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let other = app.register_user("other");
    let video_id = publish_video(&app, &owner, "Keep").await;

    let response = app
        .client()
        .delete(&api_path(&format!("/videos/{}", video_id)))
        .add_header("Authorization", bearer(&other.token))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(app.store.video_count(), 1);
    assert_eq!(app.storage.file_count(), 2);
}

#[tokio::test]
async fn test_update_thumbnail_replaces_image_asset() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let video_id = publish_video(&app, &owner, "Thumbs").await;
    let id = Uuid::parse_str(&video_id).unwrap();
    let old_key = app.store.video(id).unwrap().thumbnail.public_id;

    let response = app
        .client()
        .patch(&api_path(&format!("/videos/{}", video_id)))
        .add_header("Authorization", bearer(&owner.token))
        .multipart(MultipartForm::new().add_part("thumbnail", thumbnail_part()))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Thumbnail changed successful");
    let new_key = body["data"]["thumbnail"]["public_id"].as_str().unwrap();
    assert_ne!(new_key, old_key);
    assert!(app.storage.has_file(new_key));
    assert!(!app.storage.has_file(&old_key));
}

#[tokio::test]
async fn test_update_thumbnail_without_file_fails_after_old_delete() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let video_id = publish_video(&app, &owner, "Thumbs").await;
    let id = Uuid::parse_str(&video_id).unwrap();
    let old_key = app.store.video(id).unwrap().thumbnail.public_id;

    let response = app
        .client()
        .patch(&api_path(&format!("/videos/{}", video_id)))
        .add_header("Authorization", bearer(&owner.token))
        .multipart(MultipartForm::new().add_text("note", "no file"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Thumbnail file is missing");
    // The old thumbnail is deleted before the new one is read
    assert!(!app.storage.has_file(&old_key));
    assert_eq!(app.store.video(id).unwrap().thumbnail.public_id, old_key);
}

#[tokio::test]
async fn test_oversized_thumbnail_is_rejected() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let video_id = publish_video(&app, &owner, "Big").await;

    let big = axum_test::multipart::Part::bytes(vec![7u8; 128 * 1024])
        .file_name("huge.png")
        .mime_type("image/png");
    let response = app
        .client()
        .patch(&api_path(&format!("/videos/{}", video_id)))
        .add_header("Authorization", bearer(&owner.token))
        .multipart(MultipartForm::new().add_part("thumbnail", big))
        .await;

    assert_eq!(response.status_code(), 413);
}
