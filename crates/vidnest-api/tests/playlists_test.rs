//! Playlist API integration tests.
//!
//! Run with: `cargo test -p vidnest-api --test playlists_test`

mod helpers;

use helpers::{api_path, bearer, publish_video, setup_test_app, TestApp, TestUser};
use serde_json::{json, Value};
use uuid::Uuid;

async fn create_playlist(app: &TestApp, user: &TestUser, body: Value) -> axum_test::TestResponse {
    app.client()
        .post(&api_path("/playlist"))
        .add_header("Authorization", bearer(&user.token))
        .json(&body)
        .await
}

#[tokio::test]
async fn test_favorites_playlist_flow() {
    let app = setup_test_app();
    let user = app.register_user("curator");
    let v1 = publish_video(&app, &user, "one").await;
    let v2 = publish_video(&app, &user, "two").await;

    let response = create_playlist(&app, &user, json!({ "name": "Favorites" })).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Playlist created successfully");
    assert_eq!(body["data"]["name"], "Favorites");
    assert_eq!(body["data"]["videos"], json!([]));
    let playlist_id = body["data"]["_id"].as_str().unwrap().to_string();

    for video in [&v1, &v2] {
        let response = app
            .client()
            .patch(&api_path(&format!("/playlist/add/{}/{}", video, playlist_id)))
            .add_header("Authorization", bearer(&user.token))
            .await;
        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["message"], "video added to playlist");
    }

    // Adding the same video again is refused
    let response = app
        .client()
        .patch(&api_path(&format!("/playlist/add/{}/{}", v1, playlist_id)))
        .add_header("Authorization", bearer(&user.token))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Video already exist in playlist");

    let response = app
        .client()
        .patch(&api_path(&format!("/playlist/remove/{}/{}", v1, playlist_id)))
        .add_header("Authorization", bearer(&user.token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "video removed from playlist");
    assert_eq!(body["data"]["videos"], json!([v2]));

    let response = app
        .client()
        .get(&api_path(&format!("/playlist/{}", playlist_id)))
        .add_header("Authorization", bearer(&user.token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["data"]["videos"], json!([v2]));

    let response = app
        .client()
        .get(&api_path(&format!("/playlist/user/{}", user.user.id)))
        .add_header("Authorization", bearer(&user.token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .client()
        .delete(&api_path(&format!("/playlist/{}", playlist_id)))
        .add_header("Authorization", bearer(&user.token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Playlist deleted successfully");

    let id = Uuid::parse_str(&playlist_id).unwrap();
    assert!(app.store.playlist(id).is_none());
}

#[tokio::test]
async fn test_create_playlist_requires_name() {
    let app = setup_test_app();
    let user = app.register_user("curator");

    let response = create_playlist(&app, &user, json!({ "description": "no name" })).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Name field is required");
}

#[tokio::test]
async fn test_update_playlist_requires_both_fields() {
    let app = setup_test_app();
    let user = app.register_user("curator");
    let body: Value = create_playlist(&app, &user, json!({ "name": "Old" }))
        .await
        .json();
    let playlist_id = body["data"]["_id"].as_str().unwrap().to_string();

    let response = app
        .client()
        .patch(&api_path(&format!("/playlist/{}", playlist_id)))
        .add_header("Authorization", bearer(&user.token))
        .json(&json!({ "name": "New" }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "name and description field is required");

    let response = app
        .client()
        .patch(&api_path(&format!("/playlist/{}", playlist_id)))
        .add_header("Authorization", bearer(&user.token))
        .json(&json!({ "name": "New", "description": "Fresh" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Playlist updated successfully");

    let stored = app
        .store
        .playlist(Uuid::parse_str(&playlist_id).unwrap())
        .unwrap();
    assert_eq!(stored.name, "New");
    assert_eq!(stored.description.as_deref(), Some("Fresh"));
}

#[tokio::test]
async fn test_user_without_playlists_gets_an_error() {
    let app = setup_test_app();
    let user = app.register_user("empty");

    let response = app
        .client()
        .get(&api_path(&format!("/playlist/user/{}", user.user.id)))
        .add_header("Authorization", bearer(&user.token))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "No playlist available");
}

#[tokio::test]
async fn test_playlist_id_is_checked_before_video_id() {
    let app = setup_test_app();
    let user = app.register_user("curator");

    let response = app
        .client()
        .patch(&api_path("/playlist/add/bad-video/bad-playlist"))
        .add_header("Authorization", bearer(&user.token))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid Playlist ID");

    let response = app
        .client()
        .patch(&api_path(&format!("/playlist/add/bad-video/{}", Uuid::new_v4())))
        .add_header("Authorization", bearer(&user.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid Video ID");
}

#[tokio::test]
async fn test_unknown_playlist_lookups_fail() {
    let app = setup_test_app();
    let user = app.register_user("curator");
    let missing = Uuid::new_v4();

    let response = app
        .client()
        .get(&api_path(&format!("/playlist/{}", missing)))
        .add_header("Authorization", bearer(&user.token))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid Playlist Id");

    let response = app
        .client()
        .patch(&api_path(&format!("/playlist/add/{}/{}", Uuid::new_v4(), missing)))
        .add_header("Authorization", bearer(&user.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["message"], "Something went wrong while db operation");

    let response = app
        .client()
        .delete(&api_path(&format!("/playlist/{}", missing)))
        .add_header("Authorization", bearer(&user.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid Play List Id");
}
