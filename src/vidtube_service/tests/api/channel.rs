use serde_json::{Value, json};

use crate::helpers::{TestApp, TestUser};

#[tokio::test]
async fn anonymous_visitor_sees_counts_but_is_not_subscribed() {
    let app = TestApp::new().await;
    let (channel, channel_id, _) = app.signed_in_user().await;
    let (_, fan_id, _) = app.signed_in_user().await;
    app.user_store.subscribe(fan_id, channel_id).await.unwrap();

    let response = reqwest::Client::new()
        .get(app.url(&format!("/c/{}", channel.username.to_uppercase())))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["subscribersCount"], 1);
    assert_eq!(body["data"]["channelsSubscribedToCount"], 0);
    assert_eq!(body["data"]["isSubscribed"], false);
}

#[tokio::test]
async fn subscribed_viewer_is_reported_as_subscribed() {
    let app = TestApp::new().await;
    let (channel, channel_id, _) = app.signed_in_user().await;
    // The client now carries the fan's cookies.
    let (_, fan_id, _) = app.signed_in_user().await;
    app.user_store.subscribe(fan_id, channel_id).await.unwrap();

    let response = app.get(&format!("/c/{}", channel.username)).await;

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["isSubscribed"], true);
}

#[tokio::test]
async fn unknown_channel_returns_404() {
    let app = TestApp::new().await;

    let response = app.get("/c/nobody-here").await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn watch_history_lists_videos_with_owner_details() {
    let app = TestApp::new().await;
    let (creator, creator_id, _) = app.signed_in_user().await;
    let (_, viewer_id, _) = app.signed_in_user().await;

    let first = app
        .user_store
        .add_video(creator_id, "First", "memory://thumb/1")
        .await
        .unwrap();
    let second = app
        .user_store
        .add_video(creator_id, "Second", "memory://thumb/2")
        .await
        .unwrap();
    app.user_store.record_watch(viewer_id, second).await.unwrap();
    app.user_store.record_watch(viewer_id, first).await.unwrap();

    let response = app.get("/history").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "Second");
    assert_eq!(entries[1]["title"], "First");
    assert_eq!(entries[0]["owner"]["username"], creator.username.to_lowercase());
}

#[tokio::test]
async fn update_account_changes_details_and_rejects_taken_email() {
    let app = TestApp::new().await;
    let other = TestUser::random();
    app.register(other.form(None)).await;
    let _ = app.signed_in_user().await;

    let response = app
        .http_client
        .patch(app.url("/update-account"))
        .json(&json!({ "fullName": "New Name", "email": "fresh@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["fullName"], "New Name");
    assert_eq!(body["data"]["email"], "fresh@example.com");

    let conflict = app
        .http_client
        .patch(app.url("/update-account"))
        .json(&json!({ "fullName": "New Name", "email": other.email }))
        .send()
        .await
        .unwrap();
    assert_eq!(conflict.status().as_u16(), 409);
}
