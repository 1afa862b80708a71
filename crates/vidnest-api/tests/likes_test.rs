//! Like API integration tests.
//!
//! Run with: `cargo test -p vidnest-api --test likes_test`

mod helpers;

use helpers::{api_path, bearer, publish_video, setup_test_app};
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn test_video_like_toggles_on_and_off() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let fan = app.register_user("fan");
    let video_id = publish_video(&app, &owner, "Likeable").await;
    let path = api_path(&format!("/likes/toggle/v/{}", video_id));

    let response = app
        .client()
        .post(&path)
        .add_header("Authorization", bearer(&fan.token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Like toggled successfully");
    assert_eq!(body["data"]["isLiked"], true);
    assert_eq!(app.store.like_count(), 1);

    let details: Value = app
        .client()
        .get(&api_path(&format!("/videos/{}", video_id)))
        .add_header("Authorization", bearer(&fan.token))
        .await
        .json();
    assert_eq!(details["data"]["likesCount"], 1);
    assert_eq!(details["data"]["isLiked"], true);

    let response = app
        .client()
        .post(&path)
        .add_header("Authorization", bearer(&fan.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"]["isLiked"], false);
    assert_eq!(app.store.like_count(), 0);
}

#[tokio::test]
async fn test_likes_are_per_user() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let fan = app.register_user("fan");
    let video_id = publish_video(&app, &owner, "Popular").await;
    let path = api_path(&format!("/likes/toggle/v/{}", video_id));

    for user in [&owner, &fan] {
        let body: Value = app
            .client()
            .post(&path)
            .add_header("Authorization", bearer(&user.token))
            .await
            .json();
        assert_eq!(body["data"]["isLiked"], true);
    }
    assert_eq!(app.store.like_count(), 2);

    // Owner unlikes; the fan's like stays
    app.client()
        .post(&path)
        .add_header("Authorization", bearer(&owner.token))
        .await;
    let details: Value = app
        .client()
        .get(&api_path(&format!("/videos/{}", video_id)))
        .add_header("Authorization", bearer(&owner.token))
        .await
        .json();
    assert_eq!(details["data"]["likesCount"], 1);
    assert_eq!(details["data"]["isLiked"], false);
}

#[tokio::test]
async fn test_comment_and_tweet_likes() {
    let app = setup_test_app();
    let user = app.register_user("fan");

    let comment: Value = app
        .client()
        .post(&api_path(&format!("/comments/{}", Uuid::new_v4())))
        .add_header("Authorization", bearer(&user.token))
        .json(&json!({ "content": "like me" }))
        .await
        .json();
    let comment_id = comment["data"]["_id"].as_str().unwrap();

    let body: Value = app
        .client()
        .post(&api_path(&format!("/likes/toggle/c/{}", comment_id)))
        .add_header("Authorization", bearer(&user.token))
        .await
        .json();
    assert_eq!(body["data"]["isLiked"], true);

    // Tweets live outside this service; the like is recorded by id alone
    let body: Value = app
        .client()
        .post(&api_path(&format!("/likes/toggle/t/{}", Uuid::new_v4())))
        .add_header("Authorization", bearer(&user.token))
        .await
        .json();
    assert_eq!(body["data"]["isLiked"], true);
    assert_eq!(app.store.like_count(), 2);
}

#[tokio::test]
async fn test_like_toggle_rejects_malformed_ids() {
    let app = setup_test_app();
    let user = app.register_user("fan");

    for (kind, message) in [
        ("v", "Invalid video Id"),
        ("c", "Invalid comment Id"),
        ("t", "Invalid tweet Id"),
    ] {
        let response = app
            .client()
            .post(&api_path(&format!("/likes/toggle/{}/nope", kind)))
            .add_header("Authorization", bearer(&user.token))
            .await;
        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["message"], message);
    }
    assert_eq!(app.store.like_count(), 0);
}

#[tokio::test]
async fn test_liked_videos_lists_most_recent_first() {
    let app = setup_test_app();
    let owner = app.register_user("owner");
    let fan = app.register_user("fan");
    let first = publish_video(&app, &owner, "first").await;
    let second = publish_video(&app, &owner, "second").await;

    for video in [&first, &second] {
        app.client()
            .post(&api_path(&format!("/likes/toggle/v/{}", video)))
            .add_header("Authorization", bearer(&fan.token))
            .await;
    }

    let response = app
        .client()
        .get(&api_path("/likes/videos"))
        .add_header("Authorization", bearer(&fan.token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Liked videos fetched successfully");
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);
}
